use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::predict::{split_xyz, PositionSample};
use crate::render::figure::{Line, Marker, ScatterTrace};

const MARKER_SIZE: u32 = 3;
const SNAPSHOT_MARKER_SIZE: u32 = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TraceStyle {
    /// Line through every sample.
    #[default]
    Path,
    /// Markers only, used for the current position.
    Snapshot,
}

pub fn satellite_trace(samples: &[PositionSample], name: &str, style: TraceStyle) -> ScatterTrace {
    let (x, y, z) = split_xyz(samples);
    let mut trace = satellite_trace_xyz(x, y, z, name, style);
    trace.text = samples
        .iter()
        .map(|s| s.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .collect();
    trace
}

pub fn satellite_trace_xyz(
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
    name: &str,
    style: TraceStyle,
) -> ScatterTrace {
    let (mode, size) = match style {
        TraceStyle::Path => ("lines+markers", MARKER_SIZE),
        TraceStyle::Snapshot => ("markers", SNAPSHOT_MARKER_SIZE),
    };
    ScatterTrace {
        x,
        y,
        z,
        mode,
        marker: Marker { size, color: None },
        line: None,
        text: Vec::new(),
        name: name.to_string(),
    }
}

/// Plain polyline, no markers.
pub fn orbit_line(points: &[[f64; 3]], name: &str, width: u32) -> ScatterTrace {
    ScatterTrace {
        x: points.iter().map(|p| p[0]).collect(),
        y: points.iter().map(|p| p[1]).collect(),
        z: points.iter().map(|p| p[2]).collect(),
        mode: "lines",
        marker: Marker {
            size: 0,
            color: None,
        },
        line: Some(Line { width, color: None }),
        text: Vec::new(),
        name: name.to_string(),
    }
}
