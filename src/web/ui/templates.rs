use askama::Template;
use askama_web::WebTemplate;

#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub title: String,
    pub refresh_seconds: u64,
}

/// Self-contained page with the figure JSON inlined, written by `orbit-viewer demo`.
#[derive(Template)]
#[template(path = "standalone.html")]
pub struct StandaloneTemplate {
    pub title: String,
    pub figure_json: String,
}
