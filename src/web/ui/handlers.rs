use axum::{extract::State, response::IntoResponse};

use crate::web::state::AppState;

use super::templates::DashboardTemplate;

pub async fn dashboard(State(state): State<AppState>) -> impl IntoResponse {
    DashboardTemplate {
        title: "Orbit Viewer".to_string(),
        refresh_seconds: state.config.render.refresh_seconds,
    }
}
