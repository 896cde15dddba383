//! Numeric root search over one variable of an expression
//!
//! A search runs the local solver from every configured starting point
//! (multi-start) and the bracketed solver once over the configured
//! interval. Accepted candidates land in a [`RootSet`].

pub mod brent;
pub mod newton;
pub mod roots;

pub use roots::RootSet;

use crate::error::SearchError;
use crate::format::round_to;
use crate::options::SearchOptions;
use alpha_solve_latex::{evaluate, Bindings, Expr};

/// Root search for `expr = 0` in the variable `var`
pub struct RootSearch<'a> {
    expr: &'a Expr,
    var: &'a str,
    options: &'a SearchOptions,
    decimals: u32,
}

impl<'a> RootSearch<'a> {
    pub fn new(expr: &'a Expr, var: &'a str, options: &'a SearchOptions, decimals: u32) -> Self {
        Self {
            expr,
            var,
            options,
            decimals,
        }
    }

    /// Value of the expression at `x`
    pub fn residual(&self, x: f64) -> Result<f64, SearchError> {
        let mut bindings = Bindings::default();
        bindings.insert(self.var.to_string(), x);
        Ok(evaluate(self.expr, &bindings)?)
    }

    fn accepts(&self, x: f64) -> bool {
        matches!(self.residual(x), Ok(r) if r.abs() < self.options.residual_tolerance)
    }

    /// Local search from every initial guess
    ///
    /// A candidate is accepted when the residual at the unrounded
    /// candidate is within tolerance. Returns the number of accepted
    /// candidates.
    pub fn multi_start(&self, roots: &mut RootSet) -> usize {
        let mut accepted = 0;
        for &guess in &self.options.initial_guesses {
            match newton::local_root(|x| self.residual(x), guess, &self.options.newton) {
                Ok(candidate) if self.accepts(candidate) => {
                    tracing::trace!(var = self.var, guess, candidate, "local search accepted");
                    roots.insert(candidate);
                    accepted += 1;
                }
                Ok(candidate) => {
                    tracing::trace!(var = self.var, guess, candidate, "local search rejected");
                }
                Err(e) => {
                    tracing::trace!(var = self.var, guess, error = %e, "local search failed");
                }
            }
        }
        accepted
    }

    /// Bracketed search over the configured interval
    ///
    /// The candidate is rounded first and accepted when the residual at the
    /// rounded value is within tolerance.
    pub fn bracketed(&self, roots: &mut RootSet) -> bool {
        let [a, b] = self.options.bracket;
        match brent::brentq(|x| self.residual(x), a, b, &self.options.brent) {
            Ok(candidate) => {
                let rounded = round_to(candidate, self.decimals);
                if self.accepts(rounded) {
                    tracing::trace!(var = self.var, candidate, "bracketed search accepted");
                    roots.insert(rounded);
                    true
                } else {
                    tracing::trace!(var = self.var, candidate, "bracketed search rejected");
                    false
                }
            }
            Err(e) => {
                tracing::trace!(var = self.var, error = %e, "bracketed search failed");
                false
            }
        }
    }

    /// Multi-start followed by the bracketed search
    pub fn run(&self, roots: &mut RootSet) {
        self.multi_start(roots);
        self.bracketed(roots);
    }
}
