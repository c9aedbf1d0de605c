use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use esv_relay::state::AppState;
use esv_relay::{ServerConfig, build_router};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

fn relay_router() -> axum::Router {
    let config = ServerConfig {
        credential: "test-key".to_string(),
        bind_address: "127.0.0.1:0".parse().expect("bind address"),
        upstream_url: "http://127.0.0.1:1/".to_string(),
    };
    build_router(Arc::new(AppState::new(Arc::new(config))))
}

fn assert_cors_headers(headers: &axum::http::HeaderMap) {
    assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
    assert_eq!(
        headers.get("access-control-allow-methods").unwrap(),
        "GET,OPTIONS"
    );
    assert_eq!(
        headers.get("access-control-allow-headers").unwrap(),
        "Content-Type,Authorization"
    );
}

#[tokio::test]
async fn options_short_circuits_with_204_and_no_body() {
    let response = relay_router()
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/passage")
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_cors_headers(response.headers());
    let body = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    assert!(body.is_empty());
}

#[tokio::test]
async fn options_to_unknown_path_still_returns_204() {
    let response = relay_router()
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/anything/at/all")
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_cors_headers(response.headers());
}

#[tokio::test]
async fn get_responses_carry_cors_headers() {
    let response = relay_router()
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors_headers(response.headers());
}

#[tokio::test]
async fn error_responses_carry_cors_headers() {
    let response = relay_router()
        .oneshot(
            Request::builder()
                .uri("/passage")
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_cors_headers(response.headers());
}
