//! API error taxonomy.
//!
//! Local validation failures never reach this module: views block those
//! before any network call. Everything here is a failed call.

/// Errors from outbound API calls.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-success status. `message` carries the
    /// response body's `message` field when the server provided one.
    #[error("Request rejected with status {status}")]
    Rejected { status: u16, message: Option<String> },
    #[error("Cannot reach MediConnect API at {0}")]
    Connection(String),
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    #[error("HTTP transport error: {0}")]
    Http(String),
    #[error("Failed to parse API response: {0}")]
    ResponseParsing(String),
}

impl ApiError {
    /// The string shown to the user: the server-provided message when the
    /// rejection carried one, otherwise the caller's per-action fallback.
    /// Transport failures have no server message, so they fall back too.
    pub fn surface(&self, fallback: &str) -> String {
        match self {
            Self::Rejected {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}
