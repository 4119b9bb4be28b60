pub mod list;
pub mod search;

use sourcer_core::SourceError;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    Source(#[from] SourceError),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Output(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CommandError>;
