mod error;
mod loader;
mod memo;
mod parsing;
mod satellite;

pub use error::CatalogError;
pub use loader::{load_dataset, SatelliteSet};
pub use memo::CatalogCache;
pub use satellite::{Satellite, SatelliteInfo};

#[cfg(test)]
pub(crate) use parsing::fixtures;
