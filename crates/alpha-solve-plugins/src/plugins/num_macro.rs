//! `num(...)` inline numeric evaluation
//!
//! Rewrites `num(<latex>)` (or `\num(...)`) into the numeric value of its
//! operand, using the first value of every usable context variable.

use crate::error::{PluginError, PluginResult};
use crate::format::format_significant;
use crate::options::MacroOptions;
use crate::plugin::{ProcMacro, ProcMacroInput};
use alpha_solve_core::{Context, MetaFunctionResult, ProcMacroResult, VariableType};
use alpha_solve_latex::{evaluate, parse_latex, parse_plain, Bindings, Statement};
use lazy_regex::{lazy_regex, Lazy, Regex};
use std::ops::Range;

const NAME: &str = "Evaluate num() Functions";
const INDEX: i32 = 5;

static TRIGGER: Lazy<Regex> = lazy_regex!(r"\\?num\s*\(");

/// Text macro expanding `num(...)` calls
#[derive(Debug, Clone, Default)]
pub struct NumMacro {
    options: MacroOptions,
}

impl NumMacro {
    pub fn new(options: MacroOptions) -> Self {
        Self { options }
    }

    /// Numeric value of one operand as text
    fn evaluate_operand(&self, operand: &str, bindings: &Bindings) -> PluginResult<String> {
        let expr = match parse_latex(operand)? {
            Statement::Expression(expr) => expr,
            Statement::Equation { .. } => return Err(PluginError::UnexpectedEquation),
        };
        let value = evaluate(&expr, bindings)?;
        if !value.is_finite() {
            return Err(PluginError::NonFinite(value));
        }
        Ok(format_significant(value, self.options.significant_digits))
    }
}

impl ProcMacro for NumMacro {
    fn name(&self) -> &'static str {
        NAME
    }

    fn meta(&self, input: &ProcMacroInput<'_>) -> MetaFunctionResult {
        MetaFunctionResult::new(INDEX, NAME, TRIGGER.is_match(input.latex))
    }

    fn expand(&self, input: &ProcMacroInput<'_>) -> ProcMacroResult {
        let bindings = first_values(input.context);
        let mut latex = input.latex.to_string();

        while let Some((start, open)) = TRIGGER.find(&latex).map(|m| (m.start(), m.end())) {
            let Some(span) = scan_call(&latex, open) else {
                tracing::debug!(latex = %latex, "unmatched parenthesis in num() call");
                break;
            };

            let operand = latex[span.operand].trim().to_string();
            match self.evaluate_operand(&operand, &bindings) {
                Ok(value) => latex.replace_range(start..span.end, &value),
                Err(e) => {
                    // A failed call stops all further rewriting
                    tracing::debug!(operand = %operand, error = %e, "num() operand not evaluated");
                    break;
                }
            }
        }

        ProcMacroResult::new(latex)
    }
}

/// Bounds of one `num(...)` call
#[derive(Debug, PartialEq, Eq)]
struct CallSpan {
    /// Text between the opening and the matching closing parenthesis
    operand: Range<usize>,
    /// Byte just past the closing parenthesis
    end: usize,
}

/// Find the parenthesis closing the one that ends just before `start`
///
/// `\left(` and `\right)` each count as a single nesting step.
fn scan_call(text: &str, start: usize) -> Option<CallSpan> {
    const LEFT: &str = r"\left(";
    const RIGHT: &str = r"\right)";

    let mut depth = 1usize;
    let mut pos = start;
    while pos < text.len() {
        let rest = &text[pos..];
        let (delta, width): (isize, usize) = if rest.starts_with(LEFT) {
            (1, LEFT.len())
        } else if rest.starts_with(RIGHT) {
            (-1, RIGHT.len())
        } else {
            let c = rest.chars().next()?;
            match c {
                '(' => (1, 1),
                ')' => (-1, 1),
                _ => (0, c.len_utf8()),
            }
        };

        if delta > 0 {
            depth += 1;
        } else if delta < 0 {
            depth -= 1;
            if depth == 0 {
                return Some(CallSpan {
                    operand: start..pos,
                    end: pos + width,
                });
            }
        }
        pos += width;
    }
    None
}

/// First value of every defined variable that converts to a number
///
/// Numerical values must be plain numbers; analytical values may be any
/// plain math text. Anything else is skipped.
fn first_values(context: &Context) -> Bindings {
    let mut bindings = Bindings::default();
    for var in context.defined_variables() {
        let Some(value) = var.first_value() else {
            continue;
        };
        let number = match var.kind() {
            VariableType::Numerical => value.trim().parse::<f64>().ok(),
            VariableType::Analytical => parse_plain(value)
                .and_then(|expr| evaluate(&expr, &Bindings::default()))
                .ok(),
        };
        match number {
            Some(number) => {
                bindings.insert(var.name().to_string(), number);
            }
            None => tracing::trace!(name = var.name(), value, "skipping unusable value"),
        }
    }
    bindings
}
