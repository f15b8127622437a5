pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::profile::handlers;
use crate::state::AppState;

/// Uploaded résumés may exceed axum's 2 MB default.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/profile", post(handlers::handle_build_profile))
        .route(
            "/api/v1/profile/resume",
            post(handlers::handle_upload_resume).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/v1/profile/analyze", post(handlers::handle_analyze))
        .route("/api/v1/profile/merge", post(handlers::handle_merge))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::network::cache::NoopProfileCache;
    use crate::network::DisabledFetcher;
    use crate::profile::pipeline::ProfileDeps;
    use crate::profile::structured::DisabledStructuredExtractor;

    fn test_router() -> Router {
        build_router(AppState {
            config: Config {
                database_url: None,
                anthropic_api_key: None,
                llm_model: None,
                scraper: None,
                port: 0,
                rust_log: "info".to_string(),
            },
            profile: ProfileDeps {
                extractor: Arc::new(DisabledStructuredExtractor),
                fetcher: Arc::new(DisabledFetcher),
                cache: Arc::new(NoopProfileCache),
            },
        })
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = test_router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_reports_disabled_features() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["service"], "pathway-api");
        assert_eq!(body["features"]["networkProfiles"], false);
    }

    #[tokio::test]
    async fn test_profile_from_text() {
        let (status, body) = post_json(
            "/api/v1/profile",
            json!({ "resumeText": "Jane Doe\nSkills\nSQL, Python" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["profile"]["fullName"], "Jane Doe");
        assert_eq!(body["sources"]["resume"], "heuristic");
        assert_eq!(body["sources"]["network"], "none");
    }

    #[tokio::test]
    async fn test_empty_profile_request_is_rejected() {
        let (status, body) = post_json("/api/v1/profile", json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unconfigured_fetcher_without_resume_is_bad_gateway() {
        let (status, body) = post_json(
            "/api/v1/profile",
            json!({ "linkedinUrl": "https://www.linkedin.com/in/jane-doe" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
    }

    #[tokio::test]
    async fn test_upload_rejects_unsupported_media_type() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/profile/resume?filename=cv.txt")
            .header("content-type", "text/plain")
            .body(Body::from("Jane Doe"))
            .unwrap();
        let response = test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_analyze_accepts_any_json() {
        let (status, body) = post_json("/api/v1/profile/analyze", json!("not a profile")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["profileScore"], 0);
        assert_eq!(body["issues"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_merge_endpoint() {
        let (status, body) = post_json(
            "/api/v1/profile/merge",
            json!({
                "resume": { "fullName": "A", "skills": ["SQL", "Python"] },
                "network": { "fullName": "B", "skills": ["Python", "Excel"] }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fullName"], "B");
        assert_eq!(body["skills"], json!(["SQL", "Python", "Excel"]));

        let (_, empty) = post_json("/api/v1/profile/merge", json!({})).await;
        assert_eq!(empty, Value::Null);
    }
}
