use std::sync::Arc;

use crate::catalog::{load_dataset, CatalogCache, Satellite, SatelliteSet};
use crate::celestrak::{DatasetCache, HttpDownloader, Query};
use crate::render::{sphere, textured, EarthPrimitive, EarthStyle, EarthTexture, EARTH_RADIUS_KM};
use crate::web::api::error::{ApiError, ApiResult};
use crate::web::config::{Config, DataConfig};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub datasets: Arc<DatasetCache<HttpDownloader>>,
    pub catalog: Arc<CatalogCache>,
    pub earth: Arc<EarthPrimitive>,
}

impl AppState {
    pub fn new(config: Config, texture: Option<EarthTexture>) -> Self {
        let datasets = dataset_cache(&config.data);
        let catalog = CatalogCache::new(config.data.max_age());
        let earth = build_earth(&config, texture.as_ref());

        Self {
            config: Arc::new(config),
            datasets: Arc::new(datasets),
            catalog: Arc::new(catalog),
            earth: Arc::new(earth),
        }
    }

    /// Satellites for `query`, fetched and parsed on first use.
    pub async fn satellites(&self, query: &Query) -> ApiResult<Arc<SatelliteSet>> {
        self.catalog
            .get_or_load(query, || async {
                let path = self.datasets.ensure(query).await?;
                let set = load_dataset(&path, self.datasets.format())?;
                Ok::<_, ApiError>(set)
            })
            .await
    }

    /// The named satellite, or the first one by name when none is given.
    pub async fn satellite(
        &self,
        query: &Query,
        name: Option<&str>,
    ) -> ApiResult<Arc<Satellite>> {
        let set = self.satellites(query).await?;
        match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => Ok(set.get(name)?),
            None => set.first().ok_or_else(|| {
                ApiError::NotFound(format!("no satellites for {}={}", query.kind, query.value))
            }),
        }
    }
}

pub fn dataset_cache(data: &DataConfig) -> DatasetCache<HttpDownloader> {
    DatasetCache::new(data.folder.clone(), HttpDownloader::new())
        .with_base_url(data.base_url.clone())
        .with_format(data.format)
        .with_max_age(data.max_age())
        .with_local_only(data.local_only)
}

fn build_earth(config: &Config, texture: Option<&EarthTexture>) -> EarthPrimitive {
    let render = &config.render;
    match (render.earth, texture) {
        (EarthStyle::Textured, Some(t)) => {
            textured(EARTH_RADIUS_KM, t, render.lat_steps, render.lon_steps, 0.0)
        }
        (EarthStyle::Textured, None) => {
            log::warn!("Textured Earth requested without a texture, using plain sphere");
            sphere(EARTH_RADIUS_KM, render.lat_steps, render.lon_steps, 0.0)
        }
        (EarthStyle::Sphere, _) => sphere(EARTH_RADIUS_KM, render.lat_steps, render.lon_steps, 0.0),
    }
}

/// Offline state over TLE files in `folder`, with a coarse sphere.
#[cfg(test)]
pub(crate) fn local_state(folder: &std::path::Path) -> AppState {
    let mut config = Config::default();
    config.data.folder = folder.to_path_buf();
    config.data.local_only = true;
    config.data.format = crate::celestrak::DatasetFormat::Tle;
    config.render.lat_steps = 5;
    config.render.lon_steps = 9;
    AppState::new(config, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::ISS_TLE;
    use crate::celestrak::QueryKind;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_local_dataset_is_served() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("25544.tle"), ISS_TLE).unwrap();
        let state = local_state(dir.path());
        let query = Query::new(QueryKind::Catnr, "25544").unwrap();

        let sat = state.satellite(&query, None).await.unwrap();
        assert_eq!(sat.name(), "ISS (ZARYA)");
        let sat = state.satellite(&query, Some(" ISS (ZARYA) ")).await.unwrap();
        assert_eq!(sat.info.norad_id, 25544);
        assert_eq!(state.catalog.len().await, 1);

        assert!(matches!(
            state.satellite(&query, Some("HUBBLE")).await,
            Err(ApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_local_dataset_is_not_found() {
        let dir = TempDir::new().unwrap();
        let state = local_state(dir.path());
        let query = Query::new(QueryKind::Group, "weather").unwrap();

        assert!(matches!(
            state.satellites(&query).await,
            Err(ApiError::NotFound(_))
        ));
    }
}
