pub mod templates;

use crate::AppStateArc;
use axum::{
    Router,
    routing::{get, post},
};

pub fn routes() -> Router<AppStateArc> {
    Router::new()
        .route("/api/categories", get(templates::list_categories))
        .route("/api/templates", get(templates::list_templates))
        .route("/api/templates/{id}", get(templates::get_template))
        .route("/api/templates/{id}/render", post(templates::render_template))
}
