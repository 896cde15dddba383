//! Built-in plug-ins

mod evaluate_numerical;
mod find_roots;
mod num_macro;
mod solve_numerical;

pub use evaluate_numerical::EvaluateNumerical;
pub use find_roots::FindRoots;
pub use num_macro::NumMacro;
pub use solve_numerical::SolveNumerical;

use alpha_solve_core::{Cell, Context, Variable};
use alpha_solve_latex::{parse_latex, Expr, Statement};

/// The cell as a plain expression, if it is a non-empty, `=`-free,
/// non-equation expression that parses
fn plain_expression(cell: &Cell) -> Option<Expr> {
    let latex = cell.trimmed_latex();
    if latex.is_empty() || latex.contains('=') {
        return None;
    }
    match parse_latex(latex) {
        Ok(Statement::Expression(expr)) => Some(expr),
        _ => None,
    }
}

/// The cell as an equation, if it is non-empty and parses to one
fn equation(cell: &Cell) -> Option<Statement> {
    let latex = cell.trimmed_latex();
    if latex.is_empty() {
        return None;
    }
    parse_latex(latex).ok().filter(Statement::is_equation)
}

/// One `"<var> = <value>"` line per root plus the context holding them all
fn solution_lines(var: &str, values: Vec<String>, context: &Context) -> (Vec<String>, Context) {
    let lines = values.iter().map(|v| format!("{} = {}", var, v)).collect();
    let context = context.with_variable(Variable::numerical(var, values));
    (lines, context)
}
