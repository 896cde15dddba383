//! Roots of single-variable expressions

use super::{plain_expression, solution_lines};
use crate::error::{PluginError, PluginResult};
use crate::options::{PluginOptions, SearchOptions};
use crate::plugin::{CellFunction, CellFunctionInput};
use crate::search::{RootSearch, RootSet};
use alpha_solve_core::{CellFunctionResult, Context, MetaFunctionResult};
use alpha_solve_latex::{parse_latex, Statement};

const NAME: &str = "Root Finder";
const INDEX: i32 = 125;

/// Finds the real roots of an expression in its one unbound variable
#[derive(Debug, Clone)]
pub struct FindRoots {
    search: SearchOptions,
    decimals: u32,
}

impl Default for FindRoots {
    fn default() -> Self {
        let options = PluginOptions::default();
        Self::new(options.search, options.decimals)
    }
}

impl FindRoots {
    pub fn new(search: SearchOptions, decimals: u32) -> Self {
        Self { search, decimals }
    }

    fn find(&self, latex: &str, context: &Context) -> PluginResult<CellFunctionResult> {
        let expr = match parse_latex(latex)? {
            Statement::Expression(expr) => expr,
            Statement::Equation { .. } => return Err(PluginError::UnexpectedEquation),
        };

        let symbols = expr.free_symbols();
        let var = match symbols.iter().next() {
            Some(var) if symbols.len() == 1 => var,
            _ => {
                return Ok(CellFunctionResult::message(
                    "Root finding requires exactly one variable",
                    context,
                ))
            }
        };

        let mut roots = RootSet::new(self.decimals);
        RootSearch::new(&expr, var, &self.search, self.decimals).run(&mut roots);
        tracing::debug!(var = %var, found = roots.len(), "root search finished");

        if roots.is_empty() {
            return Ok(CellFunctionResult::message(
                "No roots found for expression",
                context,
            ));
        }

        let (lines, new_context) = solution_lines(var, roots.to_strings(), context);
        Ok(CellFunctionResult::new(lines, new_context))
    }
}

impl CellFunction for FindRoots {
    fn name(&self) -> &'static str {
        NAME
    }

    fn meta(&self, input: &CellFunctionInput<'_>) -> MetaFunctionResult {
        let use_result = plain_expression(input.cell).map_or(false, |expr| {
            let symbols = expr.free_symbols();
            symbols.len() == 1 && symbols.iter().all(|s| !input.context.is_defined(s))
        });
        MetaFunctionResult::new(INDEX, NAME, use_result)
    }

    fn solve(&self, input: &CellFunctionInput<'_>) -> CellFunctionResult {
        self.find(input.cell.trimmed_latex(), input.context)
            .unwrap_or_else(|e| {
                tracing::warn!(latex = %input.cell.latex, error = %e, "root finding failed");
                CellFunctionResult::message(format!("Error finding roots: {}", e), input.context)
            })
    }
}
