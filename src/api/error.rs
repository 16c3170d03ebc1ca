// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Error taxonomy for server calls.

use serde::Deserialize;
use thiserror::Error;

/// Failure of a single API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, refused connection, TLS, ...).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-2xx status.
    #[error("server returned {status}{}", message_suffix(.message))]
    Server { status: u16, message: Option<String> },
    /// A 2xx body did not match the expected JSON shape.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    /// An endpoint URL could not be built from the configured base.
    #[error("invalid server URL: {0}")]
    InvalidUrl(String),
}

/// Error body shape shared by all endpoints.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl ApiError {
    /// Build a server error from a status and raw body, extracting `{"message": ...}` when present.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());
        ApiError::Server { status, message }
    }

    /// Text for the user: the server's own message when it sent one, otherwise `fallback`.
    ///
    /// Transport failures get a "try again" hint since nothing reached the server.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Transport(_) => format!("{fallback}. Please try again."),
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;

    #[test]
    fn from_status_extracts_message() {
        let err = ApiError::from_status(400, r#"{"message":"File size exceeds 15MB limit"}"#);
        assert_eq!(err.user_message("Upload failed"), "File size exceeds 15MB limit");
        assert_eq!(
            err.to_string(),
            "server returned 400: File size exceeds 15MB limit"
        );
    }

    #[test]
    fn from_status_without_json_uses_fallback() {
        let err = ApiError::from_status(502, "<html>Bad Gateway</html>");
        assert!(matches!(err, ApiError::Server { status: 502, message: None }));
        assert_eq!(err.user_message("Delete failed"), "Delete failed");
    }

    #[test]
    fn blank_server_message_uses_fallback() {
        let err = ApiError::from_status(500, r#"{"message":"  "}"#);
        assert_eq!(err.user_message("Update failed"), "Update failed");
    }
}
