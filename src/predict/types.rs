use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::predict::frames::Frame;
use crate::predict::geodesy::Geodetic;

/// SGP4 output, TEME frame.
#[derive(Debug, Clone, Copy)]
pub struct StateVector {
    pub position_km: [f64; 3],
    pub velocity_km_s: [f64; 3],
}

/// Satellite position at one instant, in the requested frame.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PositionSample {
    pub timestamp: DateTime<Utc>,
    pub frame: Frame,
    #[schema(value_type = Vec<f64>)]
    pub position_km: [f64; 3],
    #[schema(value_type = Vec<f64>)]
    pub velocity_km_s: [f64; 3],
    pub subpoint: Geodetic,
}

impl PositionSample {
    pub fn speed_km_s(&self) -> f64 {
        let [vx, vy, vz] = self.velocity_km_s;
        (vx * vx + vy * vy + vz * vz).sqrt()
    }
}

/// Column-wise coordinates, the shape plot traces want.
pub fn split_xyz(samples: &[PositionSample]) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let mut xs = Vec::with_capacity(samples.len());
    let mut ys = Vec::with_capacity(samples.len());
    let mut zs = Vec::with_capacity(samples.len());
    for sample in samples {
        xs.push(sample.position_km[0]);
        ys.push(sample.position_km[1]);
        zs.push(sample.position_km[2]);
    }
    (xs, ys, zs)
}
