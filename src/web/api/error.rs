use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::CatalogError;
use crate::celestrak::{DatasetError, QueryError};
use crate::predict::PredictError;

#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    NotFound(String),
    Download(DatasetError),
    Catalog(CatalogError),
    Predict(PredictError),
}

impl From<QueryError> for ApiError {
    fn from(e: QueryError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl From<DatasetError> for ApiError {
    fn from(e: DatasetError) -> Self {
        ApiError::Download(e)
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::FileNotFound(_) | CatalogError::UnknownSatellite(_) => {
                ApiError::NotFound(e.to_string())
            }
            _ => ApiError::Catalog(e),
        }
    }
}

impl From<PredictError> for ApiError {
    fn from(e: PredictError) -> Self {
        match e {
            PredictError::Window(_) => ApiError::Validation(e.to_string()),
            _ => ApiError::Predict(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::with_message("validation_failed", &msg)),
            )
                .into_response(),
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::with_message("not_found", &msg)),
            )
                .into_response(),
            ApiError::Download(e) => {
                log::error!("Dataset download failed: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(ErrorResponse::with_message("download_failed", &e.to_string())),
                )
                    .into_response()
            }
            ApiError::Catalog(e) => {
                log::error!("Dataset parse failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::with_message("catalog_error", &e.to_string())),
                )
                    .into_response()
            }
            ApiError::Predict(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_message("propagation_error", &e.to_string())),
            )
                .into_response(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: Some(message.to_string()),
        }
    }
}
