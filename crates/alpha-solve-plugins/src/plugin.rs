//! Plug-in interfaces
//!
//! Every plug-in pairs a cheap applicability check (`meta`) with the work
//! itself. Both halves are total: failures come back as data, never as
//! errors or panics.

use alpha_solve_core::{Cell, CellFunctionResult, Context, MetaFunctionResult, ProcMacroResult};

/// Input to a cell function
#[derive(Debug, Clone, Copy)]
pub struct CellFunctionInput<'a> {
    pub cell: &'a Cell,
    pub context: &'a Context,
}

impl<'a> CellFunctionInput<'a> {
    pub fn new(cell: &'a Cell, context: &'a Context) -> Self {
        Self { cell, context }
    }
}

/// Input to a text-rewriting macro
#[derive(Debug, Clone, Copy)]
pub struct ProcMacroInput<'a> {
    pub latex: &'a str,
    pub context: &'a Context,
}

impl<'a> ProcMacroInput<'a> {
    pub fn new(latex: &'a str, context: &'a Context) -> Self {
        Self { latex, context }
    }
}

/// A plug-in that computes visible solutions for a cell
pub trait CellFunction: Send + Sync {
    /// Display name, also reported in [`MetaFunctionResult::name`]
    fn name(&self) -> &'static str;

    /// Priority and applicability for this cell
    fn meta(&self, input: &CellFunctionInput<'_>) -> MetaFunctionResult;

    /// Evaluate the cell
    fn solve(&self, input: &CellFunctionInput<'_>) -> CellFunctionResult;
}

/// A plug-in that rewrites cell text before any cell function runs
pub trait ProcMacro: Send + Sync {
    fn name(&self) -> &'static str;

    fn meta(&self, input: &ProcMacroInput<'_>) -> MetaFunctionResult;

    /// Rewrite the text, best effort
    fn expand(&self, input: &ProcMacroInput<'_>) -> ProcMacroResult;
}
