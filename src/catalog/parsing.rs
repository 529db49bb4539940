use sgp4::Elements;

use crate::catalog::error::CatalogError;
use crate::catalog::satellite::Satellite;

const NO_DATA_MARKER: &str = "No GP data found";

/// Parse an OMM JSON document (array or single object) into satellites.
pub fn parse_omm_json(content: &str, source: &str) -> Result<Vec<Satellite>, CatalogError> {
    let trimmed = content.trim();
    if trimmed.is_empty() || trimmed.starts_with(NO_DATA_MARKER) {
        log::warn!("{} contains no element sets", source);
        return Ok(Vec::new());
    }

    let invalid = |e| CatalogError::InvalidOmm {
        file: source.to_string(),
        source: e,
    };
    let records: Vec<Elements> = if trimmed.starts_with('{') {
        vec![serde_json::from_str(trimmed).map_err(invalid)?]
    } else {
        serde_json::from_str(trimmed).map_err(invalid)?
    };

    Ok(build_satellites(
        records.into_iter().map(|e| Satellite::from_elements(e, source)),
        source,
    ))
}

/// Parse OMM CSV (one header line, one row per element set) into satellites.
pub fn parse_omm_csv(content: &str, source: &str) -> Result<Vec<Satellite>, CatalogError> {
    let trimmed = content.trim();
    if trimmed.is_empty() || trimmed.starts_with(NO_DATA_MARKER) {
        log::warn!("{} contains no element sets", source);
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(trimmed.as_bytes());

    let mut records = Vec::new();
    for row in reader.deserialize::<Elements>() {
        records.push(row.map_err(|e| CatalogError::InvalidCsv {
            file: source.to_string(),
            source: e,
        })?);
    }

    Ok(build_satellites(
        records.into_iter().map(|e| Satellite::from_elements(e, source)),
        source,
    ))
}

/// Parse TLE text holding any mix of 2-line and 3-line (named) records.
pub fn parse_tle_text(content: &str, source: &str) -> Result<Vec<Satellite>, CatalogError> {
    if content.trim().starts_with(NO_DATA_MARKER) {
        log::warn!("{} contains no element sets", source);
        return Ok(Vec::new());
    }

    let mut results = Vec::new();
    for (name, line1, line2) in split_tle_records(content) {
        match Satellite::from_tle(name, &line1, &line2, source) {
            Err(e @ CatalogError::InvalidTle { .. }) => return Err(e),
            result => results.push(result),
        }
    }
    Ok(build_satellites(results.into_iter(), source))
}

fn build_satellites<I>(results: I, source: &str) -> Vec<Satellite>
where
    I: Iterator<Item = Result<Satellite, CatalogError>>,
{
    results
        .filter_map(|result| match result {
            Ok(sat) => Some(sat),
            Err(e) => {
                log::warn!("Skipping record in {}: {}", source, e);
                None
            }
        })
        .collect()
}

pub fn split_tle_records(content: &str) -> Vec<(Option<String>, String, String)> {
    let lines: Vec<&str> = content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let mut result = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if lines[i].starts_with("1 ") && i + 1 < lines.len() && lines[i + 1].starts_with("2 ") {
            result.push((None, lines[i].to_string(), lines[i + 1].to_string()));
            i += 2;
        } else if i + 2 < lines.len()
            && lines[i + 1].starts_with("1 ")
            && lines[i + 2].starts_with("2 ")
        {
            let name = lines[i].strip_prefix("0 ").unwrap_or(lines[i]).trim();
            result.push((
                Some(name.to_string()),
                lines[i + 1].to_string(),
                lines[i + 2].to_string(),
            ));
            i += 3;
        } else {
            log::debug!("Skipping unrecognised TLE line: {}", lines[i]);
            i += 1;
        }
    }

    result
}
