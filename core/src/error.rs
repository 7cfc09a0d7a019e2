//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `Http` with the raw status
//! and body. Both carry the `{"error": ...}` message when the server
//! supplied one.

/// Errors returned by `TodoClient` parse methods, transports and rendering.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound { message: Option<String> },

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http {
        status: u16,
        message: Option<String>,
        body: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),

    #[error("template rendering failed")]
    Render(#[from] askama::Error),
}

impl ApiError {
    /// Message the server put in its error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::NotFound {
                message: Some(message),
            }
            | ApiError::Http {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }

    /// True when the server answered, however unhappily.
    pub fn is_server_reported(&self) -> bool {
        matches!(self, ApiError::NotFound { .. } | ApiError::Http { .. })
    }
}
