use utoipa::OpenApi;

use super::api::catalog::{FrameInfo, QueriesResponse, QueryKindInfo, SatellitesResponse};
use super::api::error::ErrorResponse;
use super::api::params::TimeSelector;
use super::api::view::PositionResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::catalog::list_queries,
        super::api::catalog::list_satellites,
        super::api::view::figure,
        super::api::view::position,
    ),
    components(
        schemas(
            QueriesResponse,
            QueryKindInfo,
            FrameInfo,
            SatellitesResponse,
            PositionResponse,
            ErrorResponse,
            TimeSelector,
            crate::celestrak::Query,
            crate::celestrak::QueryKind,
            crate::catalog::SatelliteInfo,
            crate::predict::Frame,
            crate::predict::EarthFixedMethod,
            crate::predict::PositionSample,
            crate::predict::Geodetic,
        )
    ),
    info(
        title = "Orbit Viewer API",
        description = "CelesTrak datasets, SGP4 positions and plotly.js figures",
        version = "0.1.0"
    ),
    tags(
        (name = "catalog", description = "Dataset queries and satellite lists"),
        (name = "viewer", description = "Figures and live positions")
    )
)]
pub struct ApiDoc;
