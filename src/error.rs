//! Error types for codemark

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Engine error types
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("offset {offset} is out of bounds (text length {len})")]
    OutOfBounds { offset: usize, len: usize },

    #[error("offset {0} is not a character boundary")]
    NotCharBoundary(usize),

    #[error("span {start}..{end} does not fit the text")]
    BadSpan { start: usize, end: usize },

    #[error("invalid language profile: {0}")]
    Profile(String),
}
