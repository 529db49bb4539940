use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("dataset file not found: {0}")]
    FileNotFound(String),
    #[error("dataset read error: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("invalid OMM JSON in {file}: {source}")]
    InvalidOmm {
        file: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid OMM CSV in {file}: {source}")]
    InvalidCsv {
        file: String,
        #[source]
        source: csv::Error,
    },
    #[error("invalid TLE in {file}: {message}")]
    InvalidTle { file: String, message: String },
    #[error("invalid elements for {name}: {message}")]
    Elements { name: String, message: String },
    #[error("unknown satellite: {0}")]
    UnknownSatellite(String),
}
