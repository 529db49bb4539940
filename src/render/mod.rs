mod demo;
mod earth;
mod figure;
mod texture;
mod trace;

pub use demo::{circular_orbit_figure, DemoOptions, DEFAULT_ALTITUDE_KM, DEFAULT_ORBIT_POINTS};
pub use earth::{sphere, textured, EarthPrimitive, EarthStyle, EARTH_RADIUS_KM};
pub use figure::{build_figure, Figure};
pub use texture::EarthTexture;
pub use trace::{satellite_trace, TraceStyle};
