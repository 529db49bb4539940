use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::catalog::error::CatalogError;
use crate::catalog::parsing::{parse_omm_csv, parse_omm_json, parse_tle_text};
use crate::catalog::satellite::Satellite;
use crate::celestrak::DatasetFormat;

/// Satellites keyed by name, sorted.
#[derive(Default)]
pub struct SatelliteSet {
    satellites: BTreeMap<String, Arc<Satellite>>,
}

impl SatelliteSet {
    /// Later satellites replace earlier ones with the same name.
    pub fn from_satellites(satellites: Vec<Satellite>) -> Self {
        let mut set = SatelliteSet::default();
        for sat in satellites {
            let name = sat.info.name.clone();
            if let Some(previous) = set.satellites.insert(name, Arc::new(sat)) {
                log::debug!(
                    "Duplicate satellite name {}, replacing NORAD {}",
                    previous.info.name,
                    previous.info.norad_id
                );
            }
        }
        set
    }

    pub fn names(&self) -> Vec<&str> {
        self.satellites.keys().map(String::as_str).collect()
    }

    pub fn get(&self, name: &str) -> Result<Arc<Satellite>, CatalogError> {
        self.satellites
            .get(name)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownSatellite(name.to_string()))
    }

    pub fn first(&self) -> Option<Arc<Satellite>> {
        self.satellites.values().next().cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Satellite>> {
        self.satellites.values()
    }

    pub fn len(&self) -> usize {
        self.satellites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.satellites.is_empty()
    }
}

/// Load a dataset file written by the dataset cache.
pub fn load_dataset(path: &Path, format: DatasetFormat) -> Result<SatelliteSet, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::FileNotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path)?;
    let source = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    let satellites = match format {
        DatasetFormat::Csv => parse_omm_csv(&content, &source)?,
        DatasetFormat::Json => parse_omm_json(&content, &source)?,
        DatasetFormat::Tle => parse_tle_text(&content, &source)?,
    };

    let set = SatelliteSet::from_satellites(satellites);
    log::info!("Loaded {} satellites from {}", set.len(), source);
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parsing::fixtures::*;
    use tempfile::TempDir;

    #[test]
    fn test_duplicate_names_overwrite() {
        let mut sats = parse_tle_text(ISS_TLE, "a.tle").unwrap();
        sats.extend(parse_tle_text(ISS_TLE, "b.tle").unwrap());

        let set = SatelliteSet::from_satellites(sats);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("ISS (ZARYA)").unwrap().info.source, "b.tle");
    }

    #[test]
    fn test_names_are_sorted() {
        let mut sats = parse_omm_json(GALILEO_OMM, "g.json").unwrap();
        sats.extend(parse_tle_text(ISS_TLE, "i.tle").unwrap());

        let set = SatelliteSet::from_satellites(sats);
        assert_eq!(set.names(), vec!["GSAT0101 (GALILEO-PFM)", "ISS (ZARYA)"]);
        assert!(matches!(
            set.get("HUBBLE"),
            Err(CatalogError::UnknownSatellite(_))
        ));
    }

    #[test]
    fn test_load_dataset_by_format() {
        let dir = TempDir::new().unwrap();
        let tle_path = dir.path().join("stations.tle");
        let json_path = dir.path().join("galileo.json");
        let csv_path = dir.path().join("galileo.csv");
        fs::write(&tle_path, ISS_TLE).unwrap();
        fs::write(&json_path, GALILEO_OMM).unwrap();
        fs::write(&csv_path, GALILEO_CSV).unwrap();

        let set = load_dataset(&tle_path, DatasetFormat::Tle).unwrap();
        assert_eq!(set.get("ISS (ZARYA)").unwrap().info.source, "stations.tle");

        let set = load_dataset(&json_path, DatasetFormat::Json).unwrap();
        assert_eq!(set.len(), 1);

        let set = load_dataset(&csv_path, DatasetFormat::Csv).unwrap();
        assert_eq!(set.names(), vec!["GSAT0101 (GALILEO-PFM)", "GSAT0102 (GALILEO-FM2)"]);
    }

    #[test]
    fn test_missing_dataset() {
        let dir = TempDir::new().unwrap();
        let err = load_dataset(&dir.path().join("gnss.json"), DatasetFormat::Json)
            .err()
            .unwrap();
        assert!(matches!(err, CatalogError::FileNotFound(_)));
    }
}
