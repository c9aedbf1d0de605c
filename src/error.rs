//! Error taxonomy for the relay.
//!
//! Two failure classes reach the caller: invalid input (client error) and
//! upstream trouble (server error). Neither is retried; every failure is
//! surfaced synchronously within the request that hit it.

use crate::model::ErrorBody;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    /// The caller supplied no usable reference. Rejected before any outbound
    /// call is made.
    #[error("Missing query param q")]
    MissingQuery,

    /// The upstream API returned a non-success status or was unreachable.
    #[error("{message}")]
    Upstream { message: String },
}

impl RelayError {
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MissingQuery => StatusCode::BAD_REQUEST,
            RelayError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        Self::Upstream {
            message: err.to_string(),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
