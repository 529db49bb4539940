use axum::{
    extract::{Query as QueryString, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::SatelliteInfo;
use crate::celestrak::{Query, QueryKind};
use crate::predict::{Frame, MAX_MINUTES};
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::api::params::ViewParams;
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct QueryKindInfo {
    pub kind: QueryKind,
    pub label: String,
    pub default_value: String,
    /// Fixed choices, absent for free-text kinds
    pub options: Option<Vec<String>>,
}

impl From<QueryKind> for QueryKindInfo {
    fn from(kind: QueryKind) -> Self {
        QueryKindInfo {
            kind,
            label: kind.label().to_string(),
            default_value: kind.default_value().to_string(),
            options: kind
                .options()
                .map(|opts| opts.iter().map(|s| s.to_string()).collect()),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FrameInfo {
    pub frame: Frame,
    pub label: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QueriesResponse {
    pub kinds: Vec<QueryKindInfo>,
    pub frames: Vec<FrameInfo>,
    pub default_query: QueryKind,
    pub default_value: String,
    pub max_minutes: i64,
    pub refresh_seconds: u64,
}

#[utoipa::path(
    get,
    path = "/api/queries",
    tag = "catalog",
    responses(
        (status = 200, description = "Selectable query kinds, their values and frames", body = QueriesResponse)
    )
)]
pub async fn list_queries(State(state): State<AppState>) -> Json<QueriesResponse> {
    let defaults = &state.config.defaults;
    Json(QueriesResponse {
        kinds: QueryKind::ALL.into_iter().map(QueryKindInfo::from).collect(),
        frames: Frame::ALL
            .into_iter()
            .map(|frame| FrameInfo {
                frame,
                label: frame.to_string(),
            })
            .collect(),
        default_query: defaults.query,
        default_value: defaults.value.clone(),
        max_minutes: MAX_MINUTES,
        refresh_seconds: state.config.render.refresh_seconds,
    })
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SatellitesResponse {
    pub query: Query,
    pub satellites: Vec<SatelliteInfo>,
}

#[utoipa::path(
    get,
    path = "/api/satellites",
    tag = "catalog",
    params(ViewParams),
    responses(
        (status = 200, description = "Satellites of the dataset, sorted by name", body = SatellitesResponse),
        (status = 400, description = "Invalid query", body = ErrorResponse),
        (status = 404, description = "Dataset not available locally", body = ErrorResponse),
        (status = 502, description = "Dataset download failed", body = ErrorResponse)
    )
)]
pub async fn list_satellites(
    State(state): State<AppState>,
    QueryString(params): QueryString<ViewParams>,
) -> ApiResult<Json<SatellitesResponse>> {
    let query = params.dataset_query(&state.config.defaults)?;
    let set = state.satellites(&query).await?;

    Ok(Json(SatellitesResponse {
        query,
        satellites: set.iter().map(|sat| sat.info.clone()).collect(),
    }))
}
