//! Error types for alpha-solve-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building worksheet values
#[derive(Debug, Error)]
pub enum Error {
    /// Variable name is empty or contains whitespace
    #[error("Invalid variable name: {0:?}")]
    InvalidName(String),

    /// Two variables in one context share a name
    #[error("Variable defined more than once: {0}")]
    DuplicateVariable(String),
}
