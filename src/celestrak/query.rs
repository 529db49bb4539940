use serde::{Deserialize, Serialize};
use strum_macros::{Display, IntoStaticStr};
use utoipa::ToSchema;

use crate::celestrak::error::QueryError;

pub const GROUPS: &[&str] = &[
    "last-30-days",
    "stations",
    "visual",
    "active",
    "analyst",
    "cosmos-1408-debris",
    "fengyun-1c-debris",
    "iridium-33-debris",
    "cosmos-2251-debris",
    "weather",
    "noaa",
    "goes",
    "resource",
    "sarsat",
    "dmc",
    "tdrss",
    "argos",
    "planet",
    "spire",
    "geo",
    "gpz",
    "gpz-plus",
    "intelsat",
    "ses",
    "eutelsat",
    "telesat",
    "starlink",
    "oneweb",
    "qianfan",
    "hulianwang",
    "kuiper",
    "iridium-NEXT",
    "orbcomm",
    "globalstar",
    "amateur",
    "satnogs",
    "x-comm",
    "other-comm",
    "gnss",
    "gps-ops",
    "glo-ops",
    "galileo",
    "beidou",
    "sbas",
    "nnss",
    "musson",
    "science",
    "geodetic",
    "engineering",
    "education",
    "military",
    "radar",
    "cubesat",
    "other",
];

pub const SPECIAL_SETS: &[&str] = &["GPZ", "GPZ-PLUS", "DECAYING"];

const MAX_CATALOG_NUMBER: u64 = 999_999_999;

/// Query parameter understood by the GP endpoint.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    IntoStaticStr,
    ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum QueryKind {
    Group,
    Catnr,
    Intdes,
    Name,
    Special,
}

impl QueryKind {
    pub const ALL: [QueryKind; 5] = [
        QueryKind::Group,
        QueryKind::Catnr,
        QueryKind::Intdes,
        QueryKind::Name,
        QueryKind::Special,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            QueryKind::Group => "CelesTrak group",
            QueryKind::Catnr => "Catalogue number (1 to 9 digits)",
            QueryKind::Intdes => "International designator (yyyy-nnn)",
            QueryKind::Name => "Satellite name",
            QueryKind::Special => "Special satellite group",
        }
    }

    pub fn default_value(&self) -> &'static str {
        match self {
            QueryKind::Group => "gnss",
            QueryKind::Catnr => "25544",
            QueryKind::Intdes => "1998-067A",
            QueryKind::Name => "METEOSAT-10",
            QueryKind::Special => "GPZ",
        }
    }

    /// Fixed choices for kinds the UI offers as a select box, `None` for free text.
    pub fn options(&self) -> Option<&'static [&'static str]> {
        match self {
            QueryKind::Group => Some(GROUPS),
            QueryKind::Special => Some(SPECIAL_SETS),
            QueryKind::Catnr | QueryKind::Intdes | QueryKind::Name => None,
        }
    }

    pub fn parse(s: &str) -> Result<Self, QueryError> {
        QueryKind::ALL
            .into_iter()
            .find(|kind| kind.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| QueryError::UnknownKind(s.to_string()))
    }
}

/// Format requested from the GP endpoint and used as the cache file extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DatasetFormat {
    /// OMM rows with a header line.
    #[default]
    Csv,
    Json,
    Tle,
}

impl DatasetFormat {
    pub fn query_value(&self) -> &'static str {
        match self {
            DatasetFormat::Csv => "CSV",
            DatasetFormat::Json => "JSON",
            DatasetFormat::Tle => "TLE",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DatasetFormat::Csv => "csv",
            DatasetFormat::Json => "json",
            DatasetFormat::Tle => "tle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub struct Query {
    pub kind: QueryKind,
    pub value: String,
}

impl Query {
    pub fn new(kind: QueryKind, value: &str) -> Result<Self, QueryError> {
        let value = value.trim();
        let invalid = |reason: &str| QueryError::InvalidValue {
            kind,
            value: value.to_string(),
            reason: reason.to_string(),
        };

        match kind {
            QueryKind::Group | QueryKind::Name => {
                if value.is_empty() {
                    return Err(invalid("must not be empty"));
                }
            }
            QueryKind::Catnr => {
                if value.is_empty() || value.len() > 9 || !value.bytes().all(|b| b.is_ascii_digit())
                {
                    return Err(invalid("expected 1 to 9 digits"));
                }
                // Leading zeros are accepted by the endpoint, normalise them away.
                let number: u64 = value.parse().map_err(|_| invalid("not a number"))?;
                if number > MAX_CATALOG_NUMBER {
                    return Err(invalid("catalogue number out of range"));
                }
                return Ok(Query {
                    kind,
                    value: number.to_string(),
                });
            }
            QueryKind::Intdes => {
                if !is_international_designator(value) {
                    return Err(invalid("expected yyyy-nnn with optional piece letters"));
                }
            }
            QueryKind::Special => {
                if !SPECIAL_SETS.iter().any(|s| s.eq_ignore_ascii_case(value)) {
                    return Err(invalid("unknown special set"));
                }
                return Ok(Query {
                    kind,
                    value: value.to_ascii_uppercase(),
                });
            }
        }

        Ok(Query {
            kind,
            value: value.to_string(),
        })
    }

    /// GP endpoint parameters; the HTTP client does the encoding.
    pub fn query_pairs(&self, format: DatasetFormat) -> [(&'static str, &str); 2] {
        [
            (self.kind.into(), self.value.as_str()),
            ("FORMAT", format.query_value()),
        ]
    }

    /// Cache file name, `{value}.{format}`. Different kinds with the same value share a file.
    pub fn file_name(&self, format: DatasetFormat) -> String {
        let value: String = self
            .value
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect();
        format!("{}.{}", value, format.extension())
    }
}

fn is_international_designator(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() < 8 || bytes[4] != b'-' {
        return false;
    }
    let year_ok = bytes[..4].iter().all(u8::is_ascii_digit);
    let launch_ok = bytes[5..8].iter().all(u8::is_ascii_digit);
    let piece_ok = bytes[8..].iter().all(u8::is_ascii_alphabetic) && bytes.len() <= 11;
    year_ok && launch_ok && piece_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_maps_its_default_value() {
        for kind in QueryKind::ALL {
            let query = Query::new(kind, kind.default_value()).unwrap();
            assert_eq!(query.kind, kind);
            assert_eq!(query.value, kind.default_value());
        }
    }

    #[test]
    fn test_query_pairs_use_kind_and_format() {
        let query = Query::new(QueryKind::Group, "stations").unwrap();
        assert_eq!(
            query.query_pairs(DatasetFormat::Csv),
            [("GROUP", "stations"), ("FORMAT", "CSV")]
        );

        let query = Query::new(QueryKind::Catnr, "25544").unwrap();
        assert_eq!(
            query.query_pairs(DatasetFormat::Tle),
            [("CATNR", "25544"), ("FORMAT", "TLE")]
        );
    }

    #[test]
    fn test_catalog_number_validation() {
        assert_eq!(Query::new(QueryKind::Catnr, "0025544").unwrap().value, "25544");
        assert!(Query::new(QueryKind::Catnr, "").is_err());
        assert!(Query::new(QueryKind::Catnr, "1234567890").is_err());
        assert!(Query::new(QueryKind::Catnr, "25a44").is_err());
    }

    #[test]
    fn test_designator_and_special_validation() {
        assert!(Query::new(QueryKind::Intdes, "1998-067").is_ok());
        assert!(Query::new(QueryKind::Intdes, "1998-067A").is_ok());
        assert!(Query::new(QueryKind::Intdes, "98-067A").is_err());
        assert_eq!(Query::new(QueryKind::Special, "gpz-plus").unwrap().value, "GPZ-PLUS");
        assert!(Query::new(QueryKind::Special, "weather").is_err());
        assert!(Query::new(QueryKind::Group, "  ").is_err());
    }

    #[test]
    fn test_kind_parse_is_case_insensitive() {
        assert_eq!(QueryKind::parse("group").unwrap(), QueryKind::Group);
        assert_eq!(QueryKind::parse("INTDES").unwrap(), QueryKind::Intdes);
        assert!(QueryKind::parse("OBJECT").is_err());
    }

    #[test]
    fn test_file_name_is_value_dot_format() {
        let query = Query::new(QueryKind::Group, "gnss").unwrap();
        assert_eq!(query.file_name(DatasetFormat::Json), "gnss.json");
        let query = Query::new(QueryKind::Name, "A/B").unwrap();
        assert_eq!(query.file_name(DatasetFormat::Tle), "A_B.tle");
    }
}
