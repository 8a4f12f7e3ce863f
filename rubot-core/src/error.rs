//! Error types shared by every crate in the workspace.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RubotError {
    /// Transport failure (network error, timeout, non-success status). All
    /// request failures surface through this one variant so the poll loop can
    /// treat them uniformly.
    #[error("API request failed: {0}")]
    Api(String),

    /// The server answered with a body that is not valid JSON.
    #[error("invalid JSON response from {method}: {body}")]
    InvalidResponse { method: String, body: String },

    /// A context convenience method was called on a message that lacks the
    /// required field (e.g. editing a message without an id).
    #[error("context error: {0}")]
    Context(String),

    #[error("handler error: {0}")]
    Handler(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RubotError>;
