use std::f64::consts::{FRAC_PI_2, PI};

use serde::Deserialize;

use crate::render::figure::{MeshTrace, SurfaceTrace, Trace};
use crate::render::texture::EarthTexture;

/// Mean Earth radius used for the viewer globe.
pub const EARTH_RADIUS_KM: f64 = 6371.0;
/// Equatorial radius used by the standalone orbit figure.
pub const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6378.1;
pub const AXIAL_TILT_DEG: f64 = 23.5;

const MIN_STEPS: usize = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EarthStyle {
    #[default]
    Sphere,
    Textured,
}

/// The single Earth surface primitive of a figure.
#[derive(Debug, Clone)]
pub enum EarthPrimitive {
    Surface(SurfaceTrace),
    Mesh(MeshTrace),
}

impl EarthPrimitive {
    pub fn into_trace(self) -> Trace {
        match self {
            EarthPrimitive::Surface(s) => Trace::Surface(s),
            EarthPrimitive::Mesh(m) => Trace::Mesh3d(m),
        }
    }
}

struct Grid {
    lats: Vec<f64>,
    lons: Vec<f64>,
}

impl Grid {
    fn new(lat_steps: usize, lon_steps: usize) -> Self {
        Grid {
            lats: linspace(-FRAC_PI_2, FRAC_PI_2, lat_steps.max(MIN_STEPS)),
            lons: linspace(-PI, PI, lon_steps.max(MIN_STEPS)),
        }
    }

    fn point(&self, radius: f64, lat: f64, lon: f64, tilt_rad: f64) -> [f64; 3] {
        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_lon, cos_lon) = lon.sin_cos();
        tilt_about_x(
            [
                radius * cos_lat * cos_lon,
                radius * cos_lat * sin_lon,
                radius * sin_lat,
            ],
            tilt_rad,
        )
    }
}

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    let step = (end - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}

fn tilt_about_x(p: [f64; 3], angle: f64) -> [f64; 3] {
    if angle == 0.0 {
        return p;
    }
    let (s, c) = angle.sin_cos();
    [p[0], p[1] * c - p[2] * s, p[1] * s + p[2] * c]
}

/// Latitude-coloured sphere.
pub fn sphere(radius: f64, lat_steps: usize, lon_steps: usize, tilt_deg: f64) -> EarthPrimitive {
    let grid = Grid::new(lat_steps, lon_steps);
    let tilt = tilt_deg.to_radians();

    let rows = grid.lats.len();
    let mut x = Vec::with_capacity(rows);
    let mut y = Vec::with_capacity(rows);
    let mut z = Vec::with_capacity(rows);
    let mut color = Vec::with_capacity(rows);

    for &lat in &grid.lats {
        let points: Vec<[f64; 3]> = grid
            .lons
            .iter()
            .map(|&lon| grid.point(radius, lat, lon, tilt))
            .collect();
        x.push(points.iter().map(|p| p[0]).collect());
        y.push(points.iter().map(|p| p[1]).collect());
        z.push(points.iter().map(|p| p[2]).collect());
        color.push(vec![lat; grid.lons.len()]);
    }

    EarthPrimitive::Surface(SurfaceTrace {
        x,
        y,
        z,
        surfacecolor: color,
        colorscale: "Viridis",
        showscale: false,
        opacity: 0.9,
        hoverinfo: "skip",
        name: "Earth".to_string(),
    })
}

/// Sphere mesh coloured per vertex from an equirectangular texture.
pub fn textured(
    radius: f64,
    texture: &EarthTexture,
    lat_steps: usize,
    lon_steps: usize,
    tilt_deg: f64,
) -> EarthPrimitive {
    let grid = Grid::new(lat_steps, lon_steps);
    let tilt = tilt_deg.to_radians();
    let cols = grid.lons.len();
    let vertices = grid.lats.len() * cols;

    let mut mesh = MeshTrace {
        x: Vec::with_capacity(vertices),
        y: Vec::with_capacity(vertices),
        z: Vec::with_capacity(vertices),
        i: Vec::new(),
        j: Vec::new(),
        k: Vec::new(),
        vertexcolor: Vec::with_capacity(vertices),
        flatshading: false,
        hoverinfo: "skip",
        name: "Earth".to_string(),
    };

    for &lat in &grid.lats {
        for &lon in &grid.lons {
            let p = grid.point(radius, lat, lon, tilt);
            mesh.x.push(p[0]);
            mesh.y.push(p[1]);
            mesh.z.push(p[2]);

            let u = (lon + PI) / (2.0 * PI);
            let v = (FRAC_PI_2 - lat) / PI;
            let [r, g, b] = texture.sample(u, v);
            mesh.vertexcolor.push(format!("rgb({},{},{})", r, g, b));
        }
    }

    for row in 0..grid.lats.len() - 1 {
        for col in 0..cols - 1 {
            let a = row * cols + col;
            let b = a + 1;
            let c = a + cols;
            let d = c + 1;
            mesh.i.extend([a, a]);
            mesh.j.extend([b, d]);
            mesh.k.extend([d, c]);
        }
    }

    EarthPrimitive::Mesh(mesh)
}
