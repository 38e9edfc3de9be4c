use std::path::Path;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    api::state::HostState,
    scaffold::{access_log::AccessLog, security_headers::SecurityHeaders},
};

pub mod invoke;
pub mod state;

pub fn router(state: HostState, security: SecurityHeaders, site_dir: Option<&Path>) -> Router {
    let mut router = Router::new()
        .route("/invoke", post(invoke::invoke))
        .route("/gen_204", get(|| async { StatusCode::NO_CONTENT }));

    if let Some(site_dir) = site_dir {
        router = router.fallback_service(ServeDir::new(site_dir));
    }

    // access log outermost so the logged status is the one sent
    router.layer(security).layer(AccessLog::new(state))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, header::CONTENT_TYPE},
        response::Response,
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    fn test_router(site_dir: Option<&Path>) -> Router {
        router(HostState::new(None), SecurityHeaders::new().unwrap(), site_dir)
    }

    async fn post_invoke(body: impl Into<Body>) -> Response {
        let request = Request::builder()
            .method("POST")
            .uri("/invoke")
            .header(CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap();
        test_router(None).oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn invoke_returns_amended_response() {
        let event = json!({
            "Records": [{"cf": {"response": {
                "status": "200",
                "headers": {"x-frame-options": [{"key": "X-Frame-Options", "value": "sameorigin"}]}
            }}}]
        });

        let response = post_invoke(event.to_string()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["body"]["status"], "200");
        assert_eq!(
            body["body"]["headers"]["x-frame-options"],
            json!([{"key": "X-Frame-Options", "value": "deny"}]),
        );
        assert_eq!(body["body"]["headers"].as_object().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn invoke_without_response_is_bad_request() {
        let response = post_invoke(json!({"Records": [{"cf": {"request": {}}}]}).to_string()).await;
        assert_eq!(json_body(response).await["status"], "bad_request");

        let response = post_invoke(json!({"Records": []}).to_string()).await;
        assert_eq!(json_body(response).await["status"], "bad_request");
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let response = post_invoke("{not json").await;
        let body = json_body(response).await;
        assert_eq!(body["status"], "bad_request");
        assert!(body["access_id"].is_string());
    }

    #[tokio::test]
    async fn every_response_carries_security_headers() {
        let request = Request::builder().uri("/gen_204").body(Body::empty()).unwrap();
        let response = test_router(None).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers()["strict-transport-security"], "max-age=31536000; includeSubDomains; preload");
        assert_eq!(response.headers()["x-content-type-options"], "nosniff");

        let request = Request::builder().uri("/missing").body(Body::empty()).unwrap();
        let response = test_router(None).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()["x-frame-options"], "deny");
    }

    #[tokio::test]
    async fn site_dir_is_served_with_headers() {
        let site_dir = std::env::temp_dir().join(format!("edge-host-site-{}", uuid::Uuid::new_v4()));
        tokio::fs::create_dir_all(&site_dir).await.unwrap();
        tokio::fs::write(site_dir.join("index.html"), "<p>hi</p>").await.unwrap();

        let request = Request::builder().uri("/index.html").body(Body::empty()).unwrap();
        let response = test_router(Some(site_dir.as_path())).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["referrer-policy"], "no-referrer");

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"<p>hi</p>");

        tokio::fs::remove_dir_all(&site_dir).await.unwrap();
    }
}
