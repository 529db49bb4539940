//! WGS-84 conversions between Earth-fixed Cartesian coordinates and the
//! geodetic subpoint (latitude, longitude, height above the ellipsoid).

use serde::Serialize;
use utoipa::ToSchema;

pub const WGS84_A_KM: f64 = 6378.137;
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
pub const WGS84_E2: f64 = WGS84_F * (2.0 - WGS84_F);

const MAX_ITERATIONS: usize = 10;
const LATITUDE_TOLERANCE_RAD: f64 = 1e-13;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Geodetic {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: f64,
}

impl Geodetic {
    pub fn lat_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }
}

fn prime_vertical_radius(sin_lat: f64) -> f64 {
    WGS84_A_KM / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt()
}

pub fn geodetic_to_ecef(point: &Geodetic) -> [f64; 3] {
    let (sin_lat, cos_lat) = point.lat_rad().sin_cos();
    let (sin_lon, cos_lon) = point.lon_rad().sin_cos();
    let n = prime_vertical_radius(sin_lat);
    let h = point.altitude_km;
    [
        (n + h) * cos_lat * cos_lon,
        (n + h) * cos_lat * sin_lon,
        (n * (1.0 - WGS84_E2) + h) * sin_lat,
    ]
}

pub fn ecef_to_geodetic(position: [f64; 3]) -> Geodetic {
    let [x, y, z] = position;
    let lon = y.atan2(x);
    let p = (x * x + y * y).sqrt();

    // On the polar axis latitude is ±90° and the height is measured along z.
    if p < 1e-9 {
        let lat = if z >= 0.0 { 90.0 } else { -90.0 };
        let polar_radius = WGS84_A_KM * (1.0 - WGS84_F);
        return Geodetic {
            latitude_deg: lat,
            longitude_deg: 0.0,
            altitude_km: z.abs() - polar_radius,
        };
    }

    let mut lat = (z / (p * (1.0 - WGS84_E2))).atan();
    for _ in 0..MAX_ITERATIONS {
        let n = prime_vertical_radius(lat.sin());
        let next = (z + WGS84_E2 * n * lat.sin()).atan2(p);
        let done = (next - lat).abs() < LATITUDE_TOLERANCE_RAD;
        lat = next;
        if done {
            break;
        }
    }

    let (sin_lat, cos_lat) = lat.sin_cos();
    let n = prime_vertical_radius(sin_lat);
    // Pick the better-conditioned height formula near the poles.
    let altitude = if cos_lat.abs() > 1e-3 {
        p / cos_lat - n
    } else {
        z / sin_lat - n * (1.0 - WGS84_E2)
    };

    Geodetic {
        latitude_deg: lat.to_degrees(),
        longitude_deg: lon.to_degrees(),
        altitude_km: altitude,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_equator_prime_meridian() {
        let ecef = geodetic_to_ecef(&Geodetic {
            latitude_deg: 0.0,
            longitude_deg: 0.0,
            altitude_km: 0.0,
        });
        assert_abs_diff_eq!(ecef[0], WGS84_A_KM, epsilon = 1e-9);
        assert_abs_diff_eq!(ecef[1], 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(ecef[2], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_round_trip_through_ellipsoid() {
        for &(lat, lon, alt) in &[
            (48.1, 11.6, 0.52),
            (-33.9, 151.2, 420.0),
            (89.99, -45.0, 20_200.0),
            (0.0, 179.9, 35_786.0),
        ] {
            let point = Geodetic {
                latitude_deg: lat,
                longitude_deg: lon,
                altitude_km: alt,
            };
            let back = ecef_to_geodetic(geodetic_to_ecef(&point));
            assert_abs_diff_eq!(back.latitude_deg, lat, epsilon = 1e-9);
            assert_abs_diff_eq!(back.longitude_deg, lon, epsilon = 1e-9);
            assert_abs_diff_eq!(back.altitude_km, alt, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_north_pole() {
        let point = ecef_to_geodetic([0.0, 0.0, 7000.0]);
        assert_abs_diff_eq!(point.latitude_deg, 90.0);
        assert_abs_diff_eq!(point.altitude_km, 7000.0 - 6356.752_314_245, epsilon = 1e-6);
    }
}
