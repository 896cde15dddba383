//! Plug-in and root search error types
//!
//! These errors never leave a plug-in: the plug-in boundary turns them into
//! visible error lines. They exist so the internals can use `?`.

use alpha_solve_latex::LatexError;
use thiserror::Error;

/// Result type for plug-in internals
pub type PluginResult<T> = std::result::Result<T, PluginError>;

/// Failures of a single root search attempt
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// Bracket endpoints do not straddle a root
    #[error("f(a) and f(b) must have different signs (f({a}) = {fa}, f({b}) = {fb})")]
    NoSignChange { a: f64, b: f64, fa: f64, fb: f64 },

    /// Iteration budget exhausted
    #[error("Failed to converge after {iterations} iterations")]
    NotConverged { iterations: usize },

    /// Residual is NaN or infinite at the given point
    #[error("Residual is not finite at x = {x}")]
    NonFiniteResidual { x: f64 },

    /// Residual could not be evaluated
    #[error(transparent)]
    Evaluation(#[from] LatexError),
}

/// Errors raised while a plug-in processes a cell
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PluginError {
    /// Parsing or evaluating the cell failed
    #[error(transparent)]
    Latex(#[from] LatexError),

    /// A context value could not be turned into a number
    #[error("Value '{value}' of {name} is not numeric: {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },

    /// Expected an expression, found an equation
    #[error("Expected an expression, found an equation")]
    UnexpectedEquation,

    /// Evaluation produced NaN or an infinity
    #[error("Expression does not evaluate to a finite number ({0})")]
    NonFinite(f64),

    #[error(transparent)]
    Search(#[from] SearchError),
}
