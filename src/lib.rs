pub mod api;
pub mod config;
pub mod email_templates;
pub mod pages;
pub mod panel;
pub mod registry;
pub mod template;
pub mod views;

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use config::Config;
use registry::Registry;
use views::Views;

pub struct AppState {
    pub config: Config,
    pub views: Views,
    pub registry: &'static Registry,
}

pub type AppStateArc = Arc<AppState>;

pub fn app(state: AppStateArc) -> Router {
    Router::new()
        .merge(pages::routes())
        .merge(api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Log filter from a `RUST_LOG`-style directive, else debug in dev builds and info otherwise.
pub fn log_filter(is_dev: bool, directive: Option<&str>) -> EnvFilter {
    let default = if is_dev { "debug" } else { "info" };
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{body_text, test_state};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    #[tokio::test]
    async fn editor_form_posts_to_preview_route() {
        let request = Request::builder()
            .uri("/?template=sample-reset-password")
            .body(Body::empty())
            .unwrap();
        let response = app(test_state(registry::builtin()))
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            body_text(response)
                .await
                .contains("hx-post=\"/preview/sample-reset-password\"")
        );
    }

    #[tokio::test]
    async fn preview_route_renders_form_submission() {
        let request = Request::builder()
            .method("POST")
            .uri("/preview/sample-reset-password")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(
                "current=sample-reset-password&category=all&var.user_name=Ada&var.expiry_time=2%20hours",
            ))
            .unwrap();
        let response = app(test_state(registry::builtin()))
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_text(response).await;
        assert!(body.contains("Hi Ada,"));
        assert!(body.contains("expires in 2 hours"));
        assert!(body.contains("6 unset"));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let request = Request::builder()
            .uri("/api/templates/nope")
            .body(Body::empty())
            .unwrap();
        let response = app(test_state(registry::builtin()))
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn log_filter_prefers_valid_directive() {
        assert_eq!(log_filter(false, None).to_string(), "info");
        assert_eq!(log_filter(true, None).to_string(), "debug");
        assert_eq!(
            log_filter(false, Some("mailtpl=trace")).to_string(),
            "mailtpl=trace"
        );
        assert_eq!(log_filter(true, Some("mailtpl=verbose")).to_string(), "debug");
    }
}
