//! # alpha-solve-core
//!
//! Core data structures for the alpha-solve worksheet pipeline.
//!
//! This crate provides the values threaded between worksheet cells and
//! plug-ins:
//! - [`Variable`] - A named binding holding one or more values
//! - [`Context`] - The ordered set of variables visible to a cell
//! - [`Cell`] - One worksheet unit holding LaTeX source
//! - [`MetaFunctionResult`], [`CellFunctionResult`], [`ProcMacroResult`] -
//!   What plug-ins hand back to the orchestrator
//!
//! ## Example
//!
//! ```rust
//! use alpha_solve_core::{Context, Variable};
//!
//! let context = Context::new().with_variable(Variable::numerical("x", ["1", "2"]));
//! assert!(context.is_defined("x"));
//! assert!(!context.is_defined("y"));
//! ```

pub mod cell;
pub mod context;
pub mod error;
pub mod result;
pub mod variable;

pub use cell::Cell;
pub use context::Context;
pub use error::{Error, Result};
pub use result::{CellFunctionResult, MetaFunctionResult, ProcMacroResult};
pub use variable::{Variable, VariableType};
