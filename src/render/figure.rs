use serde::Serialize;

use crate::render::earth::EarthPrimitive;

/// A plotly.js figure, serialised as-is for `Plotly.react`.
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Surface(SurfaceTrace),
    Mesh3d(MeshTrace),
    Scatter3d(ScatterTrace),
}

#[derive(Debug, Clone, Serialize)]
pub struct SurfaceTrace {
    pub x: Vec<Vec<f64>>,
    pub y: Vec<Vec<f64>>,
    pub z: Vec<Vec<f64>>,
    pub surfacecolor: Vec<Vec<f64>>,
    pub colorscale: &'static str,
    pub showscale: bool,
    pub opacity: f64,
    pub hoverinfo: &'static str,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MeshTrace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub i: Vec<usize>,
    pub j: Vec<usize>,
    pub k: Vec<usize>,
    pub vertexcolor: Vec<String>,
    pub flatshading: bool,
    pub hoverinfo: &'static str,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScatterTrace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub mode: &'static str,
    pub marker: Marker,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub text: Vec<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Line {
    pub width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub scene: Scene,
    pub margin: Margin,
    pub showlegend: bool,
    pub uirevision: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub zaxis: Axis,
    pub aspectmode: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

impl Default for Layout {
    fn default() -> Self {
        let hidden = Axis { visible: false };
        Layout {
            scene: Scene {
                xaxis: hidden.clone(),
                yaxis: hidden.clone(),
                zaxis: hidden,
                aspectmode: "data",
            },
            margin: Margin {
                l: 0,
                r: 0,
                t: 0,
                b: 0,
            },
            showlegend: true,
            // Keeps the user's camera across re-renders.
            uirevision: "orbit-viewer",
        }
    }
}

/// One Earth primitive followed by the satellite traces.
pub fn build_figure(earth: EarthPrimitive, traces: Vec<ScatterTrace>) -> Figure {
    let mut data = Vec::with_capacity(traces.len() + 1);
    data.push(earth.into_trace());
    data.extend(traces.into_iter().map(Trace::Scatter3d));
    Figure {
        data,
        layout: Layout::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::earth::{sphere, EARTH_RADIUS_KM};
    use crate::render::trace::{satellite_trace_xyz, TraceStyle};
    use serde_json::Value;

    #[test]
    fn test_figure_layout_conventions() {
        let earth = sphere(EARTH_RADIUS_KM, 5, 9, 0.0);
        let trace = satellite_trace_xyz(
            vec![7000.0],
            vec![0.0],
            vec![0.0],
            "SAT",
            TraceStyle::Path,
        );
        let figure = build_figure(earth, vec![trace]);
        let json: Value = serde_json::to_value(&figure).unwrap();

        assert_eq!(json["data"].as_array().unwrap().len(), 2);
        assert_eq!(json["data"][0]["type"], "surface");
        assert_eq!(json["data"][1]["type"], "scatter3d");
        assert_eq!(json["data"][1]["mode"], "lines+markers");
        assert_eq!(json["layout"]["scene"]["aspectmode"], "data");
        assert_eq!(json["layout"]["scene"]["xaxis"]["visible"], false);
        assert_eq!(json["layout"]["margin"]["l"], 0);
        assert_eq!(json["layout"]["margin"]["t"], 0);
    }
}
