//! Numeric solutions of equations

use super::{equation, solution_lines};
use crate::combination::{bound_values, Combinations};
use crate::error::PluginResult;
use crate::options::{PluginOptions, SearchOptions};
use crate::plugin::{CellFunction, CellFunctionInput};
use crate::search::{RootSearch, RootSet};
use alpha_solve_core::{CellFunctionResult, Context, MetaFunctionResult};
use alpha_solve_latex::parse_latex;

const NAME: &str = "Numerical Solver";
const INDEX: i32 = 150;

/// Solves an equation for its first unbound variable
///
/// Other variables bound in the context are substituted one combination
/// at a time; the roots of every combination are pooled.
#[derive(Debug, Clone)]
pub struct SolveNumerical {
    search: SearchOptions,
    decimals: u32,
}

impl Default for SolveNumerical {
    fn default() -> Self {
        let options = PluginOptions::default();
        Self::new(options.search, options.decimals)
    }
}

impl SolveNumerical {
    pub fn new(search: SearchOptions, decimals: u32) -> Self {
        Self { search, decimals }
    }

    fn solve_equation(&self, latex: &str, context: &Context) -> PluginResult<CellFunctionResult> {
        let statement = parse_latex(latex)?;
        let Some(residual) = statement.residual() else {
            return Ok(CellFunctionResult::message(
                "Unable to solve: not an equation",
                context,
            ));
        };

        let symbols = statement.free_symbols();
        if symbols.is_empty() {
            return Ok(CellFunctionResult::message(
                "No variables to solve for",
                context,
            ));
        }
        let Some(var) = symbols.iter().find(|s| !context.is_defined(s)) else {
            return Ok(CellFunctionResult::message(
                "All variables already defined in context",
                context,
            ));
        };

        let others = bound_values(context, &symbols, Some(var))?;
        let mut roots = RootSet::new(self.decimals);

        if others.is_empty() {
            let search = RootSearch::new(&residual, var, &self.search, self.decimals);
            if search.multi_start(&mut roots) == 0 {
                search.bracketed(&mut roots);
            }
        } else {
            for combination in Combinations::new(&others) {
                let substituted = residual.substitute(&combination);
                RootSearch::new(&substituted, var, &self.search, self.decimals).run(&mut roots);
            }
        }
        tracing::debug!(
            var = %var,
            combinations = Combinations::count_all(&others),
            found = roots.len(),
            "equation search finished"
        );

        if roots.is_empty() {
            return Ok(CellFunctionResult::message(
                format!("No numerical solution found for {}", var),
                context,
            ));
        }

        let (lines, new_context) = solution_lines(var, roots.to_strings(), context);
        Ok(CellFunctionResult::new(lines, new_context))
    }
}

impl CellFunction for SolveNumerical {
    fn name(&self) -> &'static str {
        NAME
    }

    fn meta(&self, input: &CellFunctionInput<'_>) -> MetaFunctionResult {
        let use_result = equation(input.cell).map_or(false, |statement| {
            let symbols = statement.free_symbols();
            !symbols.is_empty() && symbols.iter().any(|s| !input.context.is_defined(s))
        });
        MetaFunctionResult::new(INDEX, NAME, use_result)
    }

    fn solve(&self, input: &CellFunctionInput<'_>) -> CellFunctionResult {
        self.solve_equation(input.cell.trimmed_latex(), input.context)
            .unwrap_or_else(|e| {
                tracing::warn!(latex = %input.cell.latex, error = %e, "equation solving failed");
                CellFunctionResult::message(
                    format!("Error solving equation numerically: {}", e),
                    input.context,
                )
            })
    }
}
