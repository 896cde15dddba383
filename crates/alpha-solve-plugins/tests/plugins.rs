//! Behavior of the built-in plug-ins through their public interface

use alpha_solve_core::{Cell, Context, Variable, VariableType};
use alpha_solve_plugins::{
    CellFunction, CellFunctionInput, EvaluateNumerical, FindRoots, NumMacro, ProcMacro,
    ProcMacroInput, SolveNumerical,
};
use pretty_assertions::assert_eq;

fn run(plugin: &dyn CellFunction, latex: &str, context: &Context) -> (Vec<String>, Context) {
    let cell = Cell::new(latex);
    let result = plugin.solve(&CellFunctionInput::new(&cell, context));
    (result.visible_solutions, result.new_context)
}

fn expand(latex: &str, context: &Context) -> String {
    NumMacro::default()
        .expand(&ProcMacroInput::new(latex, context))
        .modified_latex
}

/// Closed-form expressions evaluate once, rounded to 10 decimals
#[test]
fn test_closed_form_single_solution() {
    let context = Context::new();
    for (latex, expected) in [
        ("2^{10}", "1024.0"),
        (r"\frac{22}{7}", "3.1428571429"),
        (r"\pi", "3.1415926536"),
        (r"\sin\left(\frac{\pi}{6}\right)", "0.5"),
        (r"\ln\left(\mathrm{e}^{2}\right)", "2.0"),
    ] {
        let (solutions, _) = run(&EvaluateNumerical::default(), latex, &context);
        assert_eq!(solutions, vec![expected], "{}", latex);
    }
}

/// Roots of x^2 - 4 are reported ascending and stored in the context
#[test]
fn test_root_finding_updates_context() {
    let (solutions, context) = run(&FindRoots::default(), "x^2 - 4", &Context::new());
    assert_eq!(solutions, vec!["x = -2.0", "x = 2.0"]);

    let x = context.get("x").unwrap();
    assert_eq!(x.kind(), VariableType::Numerical);
    assert_eq!(x.values(), ["-2.0", "2.0"]);
}

/// A multi-valued result feeds the next cell through the product
#[test]
fn test_roots_feed_evaluation() {
    let (_, context) = run(&FindRoots::default(), "x^2 - 4", &Context::new());
    let (solutions, _) = run(&EvaluateNumerical::default(), "x^3", &context);
    assert_eq!(solutions, vec!["-8.0", "8.0"]);
}

/// Each value of a bound variable yields its own solution
#[test]
fn test_solve_with_bound_values() {
    let context = Context::new().with_variable(Variable::numerical("a", ["1", "2"]));
    let (solutions, new_context) = run(&SolveNumerical::default(), "x + a = 5", &context);
    assert_eq!(solutions, vec!["x = 3.0", "x = 4.0"]);
    assert_eq!(new_context.get("x").unwrap().values(), ["3.0", "4.0"]);
}

/// Repeated runs on identical input produce identical output
#[test]
fn test_solving_is_deterministic() {
    let context = Context::new().with_variable(Variable::analytical("c", ["sqrt(2)"]));
    let first = run(&SolveNumerical::default(), "x^2 - c = 0", &context);
    let second = run(&SolveNumerical::default(), "x^2 - c = 0", &context);
    assert_eq!(first, second);
    assert_eq!(first.0, vec!["x = -1.189207115", "x = 1.189207115"]);
}

/// Values per bound variable follow their stored order
#[test]
fn test_evaluation_over_values() {
    let context = Context::new().with_variable(Variable::numerical("x", ["1", "2", "3"]));
    let (solutions, _) = run(&EvaluateNumerical::default(), "x^2", &context);
    assert_eq!(solutions, vec!["1.0", "4.0", "9.0"]);
}

/// Values that already carry 10 decimals come back as written
#[test]
fn test_values_at_full_precision_unchanged() {
    let context = Context::new().with_variable(Variable::numerical("a", ["318036.6450819881"]));
    let (solutions, _) = run(&EvaluateNumerical::default(), "a", &context);
    assert_eq!(solutions, vec!["318036.6450819881"]);
}

/// num() calls rewrite in place, left to right
#[test]
fn test_num_macro_expansion() {
    let context = Context::new();
    assert_eq!(expand(r"num(\pi)", &context), "3.14159265358979");
    assert_eq!(
        expand(r"y = num(\sqrt{4}) + num(\sqrt{9})", &context),
        "y = 2.00000000000000 + 3.00000000000000"
    );
    assert_eq!(expand(r"num(\pi", &context), r"num(\pi");
}

/// Every plug-in reports an error line instead of failing
#[test]
fn test_plugins_never_fail() {
    let context = Context::new();
    for latex in ["", r"\frac{", "x ^ ^ 2", r"\unknown{x}", "= ="] {
        let (solutions, new_context) = run(&EvaluateNumerical::default(), latex, &context);
        assert_eq!(solutions.len(), 1, "{}", latex);
        assert_eq!(new_context, context);

        let (solutions, _) = run(&FindRoots::default(), latex, &context);
        assert_eq!(solutions.len(), 1, "{}", latex);

        let (solutions, _) = run(&SolveNumerical::default(), latex, &context);
        assert_eq!(solutions.len(), 1, "{}", latex);
    }
}
