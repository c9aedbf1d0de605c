//! Upstream fetcher for the ESV passage-text API.
//!
//! One outbound GET per lookup, credential injected as a `Token` authorization
//! header. The presentation flags sent upstream are fixed; callers cannot
//! influence them.

use crate::config::ServerConfig;
use crate::error::RelayError;
use crate::model::PassageResult;
use reqwest::{StatusCode, header};
use serde_json::Value;

/// Presentation flags the relay always sends. Footnotes stay off; references,
/// verse numbers, headings, and the short copyright stay on.
const FIXED_PARAMS: &[(&str, &str)] = &[
    ("include-passage-references", "true"),
    ("include-verse-numbers", "true"),
    ("include-first-verse-numbers", "true"),
    ("include-headings", "true"),
    ("include-footnotes", "false"),
    ("include-short-copyright", "true"),
];

/// Client for the upstream passage-text endpoint. Cheap to share: the inner
/// `reqwest::Client` is reference-counted and the rest is immutable.
#[derive(Debug, Clone)]
pub struct EsvClient {
    http: reqwest::Client,
    base_url: String,
    credential: String,
}

impl EsvClient {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.upstream_url.clone(),
            credential: config.credential.clone(),
        }
    }

    /// Resolves a normalized reference to passage text.
    ///
    /// Single linear attempt: no retry, no timeout beyond the transport
    /// default. Transport failures and non-success statuses both surface as
    /// [`RelayError::Upstream`].
    pub async fn fetch_passage(&self, query: &str) -> Result<PassageResult, RelayError> {
        if query.is_empty() {
            return Err(RelayError::MissingQuery);
        }

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("q", query)])
            .query(FIXED_PARAMS)
            .header(
                header::AUTHORIZATION,
                format!("Token {}", self.credential),
            )
            .send()
            .await?;

        let status = response.status();
        // A body that fails to parse is treated as an empty object rather
        // than an error; availability wins over strictness here.
        let payload: Value = response
            .json()
            .await
            .unwrap_or_else(|_| Value::Object(Default::default()));

        if !status.is_success() {
            return Err(RelayError::upstream(upstream_error_message(
                status, &payload,
            )));
        }

        Ok(PassageResult {
            query: query.to_string(),
            text: join_passages(&payload),
        })
    }
}

/// Prefers the upstream-provided `detail` field, falls back to the bare
/// status code.
fn upstream_error_message(status: StatusCode, payload: &Value) -> String {
    payload
        .get("detail")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

/// Joins the `passages` array with newlines and trims the result. An absent
/// or empty array yields an empty string, not an error.
fn join_passages(payload: &Value) -> String {
    payload
        .get("passages")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn joins_passages_with_newlines_and_trims() {
        let payload = json!({"passages": ["John 3:16 ...\n", "John 3:17 ...\n"]});
        assert_eq!(join_passages(&payload), "John 3:16 ...\n\nJohn 3:17 ...");
    }

    #[test]
    fn absent_passages_yield_empty_text() {
        assert_eq!(join_passages(&json!({})), "");
        assert_eq!(join_passages(&json!({"passages": []})), "");
    }

    #[test]
    fn non_string_passage_entries_are_skipped() {
        let payload = json!({"passages": ["a", 7, "b"]});
        assert_eq!(join_passages(&payload), "a\nb");
    }

    #[test]
    fn error_message_prefers_upstream_detail() {
        let payload = json!({"detail": "not found"});
        assert_eq!(
            upstream_error_message(StatusCode::NOT_FOUND, &payload),
            "not found"
        );
    }

    #[test]
    fn error_message_falls_back_to_status() {
        assert_eq!(
            upstream_error_message(StatusCode::BAD_GATEWAY, &json!({})),
            "HTTP 502"
        );
        assert_eq!(
            upstream_error_message(StatusCode::NOT_FOUND, &json!({"detail": 42})),
            "HTTP 404"
        );
    }

    #[tokio::test]
    async fn empty_query_is_rejected_before_any_outbound_call() {
        let config = ServerConfig {
            credential: "secret".to_string(),
            bind_address: "127.0.0.1:0".parse().unwrap(),
            // Unroutable on purpose: the guard must fire first.
            upstream_url: "http://127.0.0.1:1/".to_string(),
        };
        let client = EsvClient::new(&config);
        let err = client.fetch_passage("").await.unwrap_err();
        assert!(matches!(err, RelayError::MissingQuery));
    }
}
