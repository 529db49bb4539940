use axum::{
    extract::{Query as QueryString, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::SatelliteInfo;
use crate::predict::{position_at, positions, PositionSample};
use crate::render::{build_figure, satellite_trace, Figure, TraceStyle};
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::api::params::ViewParams;
use crate::web::state::AppState;

#[utoipa::path(
    get,
    path = "/api/figure",
    tag = "viewer",
    params(ViewParams),
    responses(
        (status = 200, description = "plotly.js figure JSON: Earth, orbit path and current position"),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 404, description = "Unknown satellite or dataset", body = ErrorResponse),
        (status = 502, description = "Dataset download failed", body = ErrorResponse)
    )
)]
pub async fn figure(
    State(state): State<AppState>,
    QueryString(params): QueryString<ViewParams>,
) -> ApiResult<Json<Figure>> {
    let query = params.dataset_query(&state.config.defaults)?;
    let satellite = state
        .satellite(&query, params.satellite.as_deref())
        .await?;

    let series = params.series(Utc::now())?;
    let frame = params.frame();
    let method = params.method();

    let path = positions(&satellite, &series, frame, method)?;
    let current = position_at(&satellite, series.start(), frame, method)?;

    let name = satellite.name();
    let traces = vec![
        satellite_trace(&path, name, TraceStyle::Path),
        satellite_trace(
            std::slice::from_ref(&current),
            &format!("{} (current)", name),
            TraceStyle::Snapshot,
        ),
    ];

    log::debug!(
        "Figure for {} with {} samples in {}",
        name,
        path.len(),
        frame
    );

    Ok(Json(build_figure((*state.earth).clone(), traces)))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PositionResponse {
    pub satellite: SatelliteInfo,
    pub sample: PositionSample,
    pub speed_km_s: f64,
}

#[utoipa::path(
    get,
    path = "/api/position",
    tag = "viewer",
    params(ViewParams),
    responses(
        (status = 200, description = "Position at the selected start instant, for the live marker and status panel", body = PositionResponse),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 404, description = "Unknown satellite or dataset", body = ErrorResponse)
    )
)]
pub async fn position(
    State(state): State<AppState>,
    QueryString(params): QueryString<ViewParams>,
) -> ApiResult<Json<PositionResponse>> {
    let query = params.dataset_query(&state.config.defaults)?;
    let satellite = state
        .satellite(&query, params.satellite.as_deref())
        .await?;

    let instant = params.time_mode()?.resolve(Utc::now());
    let sample = position_at(&satellite, instant, params.frame(), params.method())?;

    Ok(Json(PositionResponse {
        satellite: satellite.info.clone(),
        speed_km_s: sample.speed_km_s(),
        sample,
    }))
}
