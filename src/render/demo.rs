use std::f64::consts::TAU;

use crate::render::earth::{sphere, textured, AXIAL_TILT_DEG, EARTH_EQUATORIAL_RADIUS_KM};
use crate::render::figure::{build_figure, Figure};
use crate::render::texture::EarthTexture;
use crate::render::trace::orbit_line;

pub const DEFAULT_ALTITUDE_KM: f64 = 500.0;
pub const DEFAULT_ORBIT_POINTS: usize = 360;
const ORBIT_LINE_WIDTH: u32 = 4;

/// Equatorial circle of the given radius, closed (first point repeated last).
pub fn circular_orbit(radius_km: f64, points: usize) -> Vec<[f64; 3]> {
    let n = points.max(2);
    (0..n)
        .map(|i| {
            let theta = TAU * i as f64 / (n - 1) as f64;
            [radius_km * theta.cos(), radius_km * theta.sin(), 0.0]
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct DemoOptions {
    pub altitude_km: f64,
    pub points: usize,
    pub tilt: bool,
    pub lat_steps: usize,
    pub lon_steps: usize,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            altitude_km: DEFAULT_ALTITUDE_KM,
            points: DEFAULT_ORBIT_POINTS,
            tilt: false,
            lat_steps: 101,
            lon_steps: 101,
        }
    }
}

/// Idealised circular orbit over the globe, no orbital elements involved.
pub fn circular_orbit_figure(options: &DemoOptions, texture: Option<&EarthTexture>) -> Figure {
    let tilt = if options.tilt { AXIAL_TILT_DEG } else { 0.0 };
    let earth = match texture {
        Some(t) => textured(
            EARTH_EQUATORIAL_RADIUS_KM,
            t,
            options.lat_steps,
            options.lon_steps,
            tilt,
        ),
        None => sphere(
            EARTH_EQUATORIAL_RADIUS_KM,
            options.lat_steps,
            options.lon_steps,
            tilt,
        ),
    };

    let radius = EARTH_EQUATORIAL_RADIUS_KM + options.altitude_km;
    let orbit = circular_orbit(radius, options.points);
    let name = format!("{:.0} km circular orbit", options.altitude_km);
    build_figure(earth, vec![orbit_line(&orbit, &name, ORBIT_LINE_WIDTH)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_circle_is_closed_and_equatorial() {
        let points = circular_orbit(6878.1, 360);
        assert_eq!(points.len(), 360);
        assert_abs_diff_eq!(points[0][0], points[359][0], epsilon = 1e-9);
        assert_abs_diff_eq!(points[0][1], points[359][1], epsilon = 1e-9);
        for p in &points {
            assert_abs_diff_eq!((p[0] * p[0] + p[1] * p[1]).sqrt(), 6878.1, epsilon = 1e-9);
            assert_eq!(p[2], 0.0);
        }
    }

    #[test]
    fn test_demo_figure_has_earth_and_orbit() {
        let figure = circular_orbit_figure(
            &DemoOptions {
                lat_steps: 5,
                lon_steps: 5,
                ..DemoOptions::default()
            },
            None,
        );
        assert_eq!(figure.data.len(), 2);
        let json = serde_json::to_value(&figure).unwrap();
        assert_eq!(json["data"][1]["mode"], "lines");
        assert_eq!(json["data"][1]["name"], "500 km circular orbit");
    }
}
