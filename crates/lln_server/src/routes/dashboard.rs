//! HTML dashboard page
//!
//! The page is compiled into the binary. It collects the parameters, calls
//! `POST /api/v1/simulate` and hands the returned chart definitions to Chart.js.

use axum::{response::Html, routing::get, Router};

use super::AppState;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Build the dashboard routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(index_handler))
}

/// GET / - Dashboard page
async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_index_serves_dashboard() {
        let state = AppState::new(Arc::new(ServerConfig::default()));
        let router = routes().with_state(state);

        let response = router
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Run simulation"));
        assert!(html.contains("/api/v1/simulate"));
    }

    #[test]
    fn test_page_reports_failed_requests() {
        // Error bodies are read without assuming JSON, and the seed is
        // checked before it is sent.
        assert!(INDEX_HTML.contains("response.json().catch(() => null)"));
        assert!(INDEX_HTML.contains("!response.ok || data === null"));
        assert!(INDEX_HTML.contains("Number.isSafeInteger(parsed)"));
    }
}
