//! Expression error types

use thiserror::Error;

/// Result type for expression operations
pub type LatexResult<T> = std::result::Result<T, LatexError>;

/// Errors that can occur during parsing or evaluation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LatexError {
    /// Malformed input or unsupported construct
    #[error("Parse error: {0}")]
    Parse(String),

    /// A symbol had no value during evaluation
    #[error("Unbound symbol: {0}")]
    UnboundSymbol(String),

    /// Unknown function
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Wrong number of arguments
    #[error("Wrong number of arguments for {function}: expected {expected}, got {actual}")]
    ArgumentCount {
        function: String,
        expected: String,
        actual: usize,
    },
}
