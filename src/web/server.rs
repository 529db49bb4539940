use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::render::{EarthStyle, EarthTexture};

use super::api::catalog as catalog_handlers;
use super::api::view as view_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::state::AppState;
use super::ui::handlers as ui_handlers;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // UI routes
        .route("/", get(ui_handlers::dashboard))
        // Catalog API endpoints
        .route("/api/queries", get(catalog_handlers::list_queries))
        .route("/api/satellites", get(catalog_handlers::list_satellites))
        // Viewer API endpoints
        .route("/api/figure", get(view_handlers::figure))
        .route("/api/position", get(view_handlers::position))
        // Static files
        .nest_service("/static", ServeDir::new("src/web/static"))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();

    let texture = match (&config.render.earth, &config.render.texture) {
        (EarthStyle::Textured, Some(path)) => match EarthTexture::load_from_path(path) {
            Ok(texture) => Some(texture),
            Err(e) => {
                log::warn!("Failed to load Earth texture {}: {}", path.display(), e);
                None
            }
        },
        _ => None,
    };

    let state = AppState::new(config, texture);
    let app = router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}
