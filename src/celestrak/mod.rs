mod cache;
mod download;
mod error;
mod query;

pub use cache::{DatasetCache, DEFAULT_BASE_URL};
pub use download::HttpDownloader;
pub use error::{DatasetError, QueryError};
pub use query::{DatasetFormat, Query, QueryKind};
