//! Values returned by plug-ins

use crate::context::Context;

/// Applicability verdict of a plug-in for one cell
///
/// `index` orders candidates (lower runs earlier); `use_result` filters them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetaFunctionResult {
    pub index: i32,
    pub name: String,
    pub use_result: bool,
}

impl MetaFunctionResult {
    pub fn new<S: Into<String>>(index: i32, name: S, use_result: bool) -> Self {
        Self {
            index,
            name: name.into(),
            use_result,
        }
    }
}

/// Output of a cell function
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellFunctionResult {
    /// User-facing lines, in input-combination or ascending-root order
    pub visible_solutions: Vec<String>,
    /// Context handed to the next cell
    pub new_context: Context,
}

impl CellFunctionResult {
    pub fn new(visible_solutions: Vec<String>, new_context: Context) -> Self {
        Self {
            visible_solutions,
            new_context,
        }
    }

    /// A single visible line with the context passed through
    pub fn message<S: Into<String>>(message: S, context: &Context) -> Self {
        Self::new(vec![message.into()], context.clone())
    }
}

/// Output of a text-rewriting macro
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcMacroResult {
    pub modified_latex: String,
}

impl ProcMacroResult {
    pub fn new<S: Into<String>>(modified_latex: S) -> Self {
        Self {
            modified_latex: modified_latex.into(),
        }
    }
}
