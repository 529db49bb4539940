mod error;
mod frames;
mod geodesy;
mod propagation;
mod time;
mod types;

pub use error::PredictError;
pub use frames::{EarthFixedMethod, Frame};
pub use geodesy::Geodetic;
pub use propagation::{position_at, positions};
pub use time::{TimeMode, TimeSeries, MAX_MINUTES};
pub use types::{split_xyz, PositionSample};
