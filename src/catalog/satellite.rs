use chrono::{DateTime, Utc};
use serde::Serialize;
use sgp4::{Constants, Elements};
use utoipa::ToSchema;

use crate::catalog::error::CatalogError;

/// Summary of a loaded satellite
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SatelliteInfo {
    pub name: String,
    pub norad_id: u64,
    pub international_designator: Option<String>,
    pub epoch: DateTime<Utc>,
    pub source: String,
}

/// A named satellite with initialised SGP4 constants.
pub struct Satellite {
    pub info: SatelliteInfo,
    pub elements: Elements,
    pub constants: Constants,
}

impl Satellite {
    pub fn from_elements(elements: Elements, source: &str) -> Result<Self, CatalogError> {
        let name = elements
            .object_name
            .clone()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("NORAD {}", elements.norad_id));

        let constants = Constants::from_elements(&elements).map_err(|e| CatalogError::Elements {
            name: name.clone(),
            message: e.to_string(),
        })?;

        Ok(Satellite {
            info: SatelliteInfo {
                name,
                norad_id: elements.norad_id,
                international_designator: elements.international_designator.clone(),
                epoch: elements.datetime.and_utc(),
                source: source.to_string(),
            },
            elements,
            constants,
        })
    }

    pub fn from_tle(
        name: Option<String>,
        line1: &str,
        line2: &str,
        source: &str,
    ) -> Result<Self, CatalogError> {
        let elements = Elements::from_tle(name, line1.as_bytes(), line2.as_bytes()).map_err(|e| {
            CatalogError::InvalidTle {
                file: source.to_string(),
                message: e.to_string(),
            }
        })?;
        Self::from_elements(elements, source)
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }
}
