// Error types for slidetab.
// Covers storage IO, blob serialization, and configuration errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlidetabError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No state directory available on this platform")]
    NoStateDir,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SlidetabError>;
