//! Router assembly, request handlers, and the CORS layer.

use crate::error::RelayError;
use crate::model::PassageResult;
use crate::normalize::normalize;
use crate::state::AppState;
use axum::extract::{Query, Request, State};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz_handler))
        .route("/passage", get(passage_handler))
        .layer(middleware::from_fn(cors_middleware))
        .with_state(state)
}

/// Liveness probe. Fixed body, never touches the upstream.
async fn healthz_handler() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
struct PassageParams {
    q: Option<String>,
}

/// `GET /passage?q=<reference>`: normalize, fetch, reshape.
async fn passage_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PassageParams>,
) -> Result<Json<PassageResult>, RelayError> {
    let query = normalize(params.q.as_deref());
    if query.is_empty() {
        return Err(RelayError::MissingQuery);
    }

    tracing::debug!(query = %query, "passage lookup");
    let result = state.esv().fetch_passage(&query).await.inspect_err(|err| {
        tracing::warn!(query = %query, error = %err, "passage lookup failed");
    })?;

    Ok(Json(result))
}

/// Permissive CORS for browser callers. Preflight `OPTIONS` requests
/// short-circuit with 204 and no body; everything else passes through with
/// the headers appended.
async fn cors_middleware(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        apply_cors_headers(&mut response);
        return response;
    }
    let mut response = next.run(req).await;
    apply_cors_headers(&mut response);
    response
}

fn apply_cors_headers(response: &mut Response) {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET,OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type,Authorization"),
    );
}
