//! # alpha-solve-latex
//!
//! Expression bridge for alpha-solve worksheets.
//!
//! This crate provides:
//! - LaTeX parsing (text → [`Statement`]) and plain-text parsing for stored values
//! - LaTeX printing (AST → text)
//! - Numeric evaluation with symbol substitutions
//! - Elementary functions (`\sin`, `\ln`, `\sqrt`, ...)
//!
//! ## Example
//!
//! ```rust
//! use alpha_solve_latex::{evaluate, parse_latex, Bindings};
//!
//! let statement = parse_latex(r"\frac{x^2}{2} + 1").unwrap();
//! let expr = statement.as_expression().unwrap();
//!
//! let mut bindings = Bindings::default();
//! bindings.insert("x".to_string(), 4.0);
//! assert_eq!(evaluate(expr, &bindings).unwrap(), 9.0);
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod parser;
pub mod printer;

pub use ast::{BinaryOperator, Constant, Expr, Statement, UnaryOperator};
pub use error::{LatexError, LatexResult};
pub use evaluator::{evaluate, Bindings};
pub use parser::{parse_latex, parse_plain};
pub use printer::to_latex;
