//! Wire types for the relay's JSON responses.

use serde::{Deserialize, Serialize};

/// Successful passage lookup, serialized as the `/passage` 200 body.
///
/// Built once per request and discarded after serialization; nothing retains
/// it across requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassageResult {
    /// The normalized reference the lookup ran against.
    pub query: String,
    /// Upstream passages joined with newlines, trimmed. Empty when the
    /// upstream returned no passages for the reference.
    pub text: String,
}

/// Error payload returned for 4xx/5xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
