use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

pub const EARTH_ROTATION_RAD_S: f64 = 7.292_115e-5;

/// Reference frame of a position sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Frame {
    /// SGP4 output (TEME) as is. `eci` and `gcrs` select it too, without the
    /// precession/nutation that would take TEME to GCRS.
    #[default]
    #[serde(alias = "teme", alias = "eci", alias = "gcrs")]
    #[strum(to_string = "Inertial, TEME (approximates GCRS)")]
    Inertial,
    /// Earth-centered, Earth-fixed.
    #[serde(alias = "ecef", alias = "itrs", alias = "ecet")]
    #[strum(to_string = "Earth centered & fixed (ECEF)")]
    EarthFixed,
}

impl Frame {
    pub const ALL: [Frame; 2] = [Frame::Inertial, Frame::EarthFixed];
}

/// How Earth-fixed coordinates are obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EarthFixedMethod {
    /// Rotate the inertial vector about z by the sidereal angle.
    #[default]
    Rotation,
    /// Go through the WGS-84 subpoint and rebuild x, y, z on the ellipsoid.
    Geodetic,
}

/// Greenwich sidereal angle in radians.
pub fn sidereal_angle(timestamp: DateTime<Utc>) -> f64 {
    sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&timestamp.naive_utc()))
}

pub fn teme_to_ecef_position(pos_teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let (sin_gmst, cos_gmst) = gmst.sin_cos();
    [
        pos_teme[0] * cos_gmst + pos_teme[1] * sin_gmst,
        -pos_teme[0] * sin_gmst + pos_teme[1] * cos_gmst,
        pos_teme[2],
    ]
}

pub fn teme_to_ecef_velocity(pos_teme: [f64; 3], vel_teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let pos = teme_to_ecef_position(pos_teme, gmst);
    let rotated = teme_to_ecef_position(vel_teme, gmst);
    [
        rotated[0] + EARTH_ROTATION_RAD_S * pos[1],
        rotated[1] - EARTH_ROTATION_RAD_S * pos[0],
        rotated[2],
    ]
}
