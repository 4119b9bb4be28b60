// src/error.rs
use std::io;

/// Single failure category surfaced by the protocol layer. Callers that need
/// the coarse taxonomy (transport / protocol / parse) go through
/// [`SourceError::code_str`].
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned HTTP {status}, payload: {body}")]
    Protocol { status: u16, body: String },

    #[error("malformed service response: {0}")]
    Parse(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl SourceError {
    /// Stable code for logs and downstream classification.
    pub fn code_str(&self) -> &'static str {
        match self {
            SourceError::Io(_) | SourceError::Http(_) => "transport",
            SourceError::Protocol { .. } => "protocol",
            SourceError::Parse(_) => "parse",
            SourceError::Config(_) => "config",
        }
    }

    /// True when the underlying cause is connection- or stream-level I/O
    /// rather than the content of the response.
    pub fn is_transport(&self) -> bool {
        matches!(self, SourceError::Io(_) | SourceError::Http(_))
    }
}
