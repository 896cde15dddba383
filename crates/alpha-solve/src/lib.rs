//! # alpha-solve
//!
//! Evaluate LaTeX worksheets with pluggable numeric solvers.
//!
//! A worksheet is a list of cells, each holding one LaTeX expression or
//! equation. Plug-ins decide whether they apply to a cell and, if so, turn
//! it into visible solutions and a new variable context for the cells that
//! follow.
//!
//! ## Features
//!
//! - `num(...)` inline evaluation inside cell text
//! - Numeric evaluation, expanded over every combination of bound values
//! - Root finding for single-variable expressions
//! - Numeric equation solving
//!
//! ## Example
//!
//! ```rust
//! use alpha_solve::prelude::*;
//!
//! let context = Context::new().with_variable(Variable::numerical("a", ["1", "2"]));
//! let worksheet = Worksheet::from_latex(["x + a = 5", "2x"]);
//!
//! let run = worksheet.run(&PluginRegistry::default(), context);
//! assert_eq!(run.outcomes[0].visible_solutions, vec!["x = 3.0", "x = 4.0"]);
//! assert_eq!(run.outcomes[1].visible_solutions, vec!["6.0", "8.0"]);
//! ```

pub mod prelude;
pub mod worksheet;

pub use worksheet::{evaluate_cell, expand_macros, CellOutcome, Worksheet, WorksheetRun};

// Re-export core types
pub use alpha_solve_core::{
    Cell, CellFunctionResult, Context, Error, MetaFunctionResult, ProcMacroResult, Result,
    Variable, VariableType,
};

// Re-export the expression bridge
pub use alpha_solve_latex::{
    evaluate, parse_latex, parse_plain, to_latex, Bindings, Expr, LatexError, Statement,
};

// Re-export plug-in types
pub use alpha_solve_plugins::{
    CellFunction, CellFunctionInput, EvaluateNumerical, FindRoots, MacroOptions, NumMacro,
    PluginOptions, PluginRegistry, ProcMacro, ProcMacroInput, SearchOptions, SolveNumerical,
};
