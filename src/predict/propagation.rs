use chrono::{DateTime, Utc};

use crate::catalog::Satellite;
use crate::predict::error::PredictError;
use crate::predict::frames::{
    sidereal_angle, teme_to_ecef_position, teme_to_ecef_velocity, EarthFixedMethod, Frame,
};
use crate::predict::geodesy::{ecef_to_geodetic, geodetic_to_ecef};
use crate::predict::time::TimeSeries;
use crate::predict::types::{PositionSample, StateVector};

pub fn propagate(satellite: &Satellite, timestamp: DateTime<Utc>) -> Result<StateVector, PredictError> {
    let minutes = satellite
        .elements
        .datetime_to_minutes_since_epoch(&timestamp.naive_utc())
        .map_err(|_| PredictError::Epoch(timestamp.to_rfc3339()))?;

    let prediction = satellite.constants.propagate(minutes)?;

    Ok(StateVector {
        position_km: prediction.position,
        velocity_km_s: prediction.velocity,
    })
}

pub fn position_at(
    satellite: &Satellite,
    timestamp: DateTime<Utc>,
    frame: Frame,
    method: EarthFixedMethod,
) -> Result<PositionSample, PredictError> {
    let state = propagate(satellite, timestamp)?;
    let gmst = sidereal_angle(timestamp);

    let ecef = teme_to_ecef_position(state.position_km, gmst);
    let subpoint = ecef_to_geodetic(ecef);

    let (position_km, velocity_km_s) = match frame {
        Frame::Inertial => (state.position_km, state.velocity_km_s),
        Frame::EarthFixed => {
            let velocity = teme_to_ecef_velocity(state.position_km, state.velocity_km_s, gmst);
            let position = match method {
                EarthFixedMethod::Rotation => ecef,
                EarthFixedMethod::Geodetic => geodetic_to_ecef(&subpoint),
            };
            (position, velocity)
        }
    };

    Ok(PositionSample {
        timestamp,
        frame,
        position_km,
        velocity_km_s,
        subpoint,
    })
}

pub fn positions(
    satellite: &Satellite,
    series: &TimeSeries,
    frame: Frame,
    method: EarthFixedMethod,
) -> Result<Vec<PositionSample>, PredictError> {
    series
        .instants()
        .into_iter()
        .map(|t| position_at(satellite, t, frame, method))
        .collect()
}
