//! Numeric evaluation of expressions

use super::plain_expression;
use crate::combination::{bound_values, Combinations};
use crate::error::{PluginError, PluginResult};
use crate::format::{format_float, round_to};
use crate::options::PluginOptions;
use crate::plugin::{CellFunction, CellFunctionInput};
use alpha_solve_core::{CellFunctionResult, Context, MetaFunctionResult};
use alpha_solve_latex::{evaluate, parse_latex, to_latex, Bindings, Expr, Statement};

const NAME: &str = "Numerical Evaluation";
const INDEX: i32 = 75;

/// Evaluates an expression once per combination of bound context values
#[derive(Debug, Clone)]
pub struct EvaluateNumerical {
    decimals: u32,
}

impl Default for EvaluateNumerical {
    fn default() -> Self {
        Self::new(PluginOptions::default().decimals)
    }
}

impl EvaluateNumerical {
    pub fn new(decimals: u32) -> Self {
        Self { decimals }
    }

    fn render(&self, value: f64) -> PluginResult<String> {
        if !value.is_finite() {
            return Err(PluginError::NonFinite(value));
        }
        Ok(format_float(round_to(value, self.decimals)))
    }

    fn evaluate(&self, latex: &str, context: &Context) -> PluginResult<Vec<String>> {
        let expr = match parse_latex(latex)? {
            Statement::Expression(expr) => expr,
            Statement::Equation { .. } => return Err(PluginError::UnexpectedEquation),
        };

        let bound = bound_values(context, &expr.free_symbols(), None)?;
        if bound.is_empty() {
            return Ok(vec![self.closed_form(&expr)]);
        }

        let mut solutions: Vec<String> = Vec::new();
        for combination in Combinations::new(&bound) {
            let value = evaluate(&expr, &combination)?;
            let text = self.render(value)?;
            if !solutions.contains(&text) {
                solutions.push(text);
            }
        }
        Ok(solutions)
    }

    /// Value of an expression with nothing to substitute, or its LaTeX when
    /// it has no finite value
    fn closed_form(&self, expr: &Expr) -> String {
        evaluate(expr, &Bindings::default())
            .map_err(PluginError::from)
            .and_then(|value| self.render(value))
            .unwrap_or_else(|e| {
                tracing::debug!(error = %e, "no numeric value, keeping symbolic form");
                to_latex(expr)
            })
    }
}

impl CellFunction for EvaluateNumerical {
    fn name(&self) -> &'static str {
        NAME
    }

    fn meta(&self, input: &CellFunctionInput<'_>) -> MetaFunctionResult {
        let use_result = plain_expression(input.cell).map_or(false, |expr| {
            let symbols = expr.free_symbols();
            symbols.is_empty() || symbols.iter().any(|s| input.context.is_defined(s))
        });
        MetaFunctionResult::new(INDEX, NAME, use_result)
    }

    fn solve(&self, input: &CellFunctionInput<'_>) -> CellFunctionResult {
        match self.evaluate(input.cell.trimmed_latex(), input.context) {
            Ok(solutions) => CellFunctionResult::new(solutions, input.context.clone()),
            Err(e) => {
                tracing::warn!(latex = %input.cell.latex, error = %e, "numeric evaluation failed");
                CellFunctionResult::message(
                    format!("Error evaluating expression: {}", e),
                    input.context,
                )
            }
        }
    }
}
