//! # alpha-solve-plugins
//!
//! Evaluator plug-ins for alpha-solve worksheets.
//!
//! Each plug-in pairs an applicability check with an evaluation step:
//!
//! | plug-in | index | applies to |
//! |---|---|---|
//! | [`NumMacro`] | 5 | text containing `num(...)` |
//! | [`EvaluateNumerical`] | 75 | constant expressions, or ones using bound variables |
//! | [`FindRoots`] | 125 | expressions in exactly one unbound variable |
//! | [`SolveNumerical`] | 150 | equations with an unbound variable |
//!
//! Context variables with several values expand into a Cartesian product
//! (see [`combination`]); roots come from a multi-start local search plus a
//! bracketed search (see [`search`]).
//!
//! ## Example
//!
//! ```rust
//! use alpha_solve_core::{Cell, Context};
//! use alpha_solve_plugins::{CellFunction, CellFunctionInput, FindRoots};
//!
//! let cell = Cell::new("x^2 - 4");
//! let context = Context::new();
//! let input = CellFunctionInput::new(&cell, &context);
//!
//! let finder = FindRoots::default();
//! assert!(finder.meta(&input).use_result);
//!
//! let result = finder.solve(&input);
//! assert_eq!(result.visible_solutions, vec!["x = -2.0", "x = 2.0"]);
//! ```

pub mod combination;
pub mod error;
pub mod format;
pub mod options;
pub mod plugin;
pub mod plugins;
pub mod registry;
pub mod search;

pub use error::{PluginError, PluginResult, SearchError};
pub use options::{MacroOptions, PluginOptions, SearchOptions};
pub use plugin::{CellFunction, CellFunctionInput, ProcMacro, ProcMacroInput};
pub use plugins::{EvaluateNumerical, FindRoots, NumMacro, SolveNumerical};
pub use registry::{PluginRegistry, Ranked};
