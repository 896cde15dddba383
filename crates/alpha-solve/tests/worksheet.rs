//! Tests for running whole worksheets through the built-in plug-ins

use alpha_solve::prelude::*;
use alpha_solve::{SearchOptions, VariableType};
use pretty_assertions::assert_eq;

fn run(cells: &[&str], context: Context) -> WorksheetRun {
    Worksheet::from_latex(cells.iter().copied()).run(&PluginRegistry::default(), context)
}

fn solutions(run: &WorksheetRun) -> Vec<Vec<String>> {
    run.outcomes
        .iter()
        .map(|o| o.visible_solutions.clone())
        .collect()
}

/// Root finding feeds every root into the next cell
#[test]
fn test_roots_then_evaluation() {
    let run = run(&["x^2 - 4", "x + 10"], Context::new());

    assert_eq!(run.outcomes[0].plugin.as_deref(), Some("Root Finder"));
    assert_eq!(run.outcomes[1].plugin.as_deref(), Some("Numerical Evaluation"));
    assert_eq!(
        solutions(&run),
        vec![vec!["x = -2.0", "x = 2.0"], vec!["8.0", "12.0"]]
    );

    let x = run.context.get("x").unwrap();
    assert_eq!(x.kind(), VariableType::Numerical);
    assert_eq!(x.values(), ["-2.0", "2.0"]);
}

/// Equation solving over a multi-valued context variable
#[test]
fn test_solve_against_bound_values() {
    let context = Context::new().with_variable(Variable::numerical("a", ["1", "2"]));
    let run = run(&["x + a = 5"], context);

    assert_eq!(run.outcomes[0].plugin.as_deref(), Some("Numerical Solver"));
    assert_eq!(solutions(&run), vec![vec!["x = 3.0", "x = 4.0"]]);
    assert_eq!(run.context.get("x").unwrap().values(), ["3.0", "4.0"]);
}

/// Solved values chain through several cells
#[test]
fn test_chained_cells() {
    let run = run(
        &["2r = 6", r"\pi r^{2}", "A = r + 1", "A^2"],
        Context::new(),
    );
    assert_eq!(
        solutions(&run),
        vec![
            vec!["r = 3.0"],
            vec!["28.2743338823"],
            vec!["A = 4.0"],
            vec!["16.0"],
        ]
    );
    let names: Vec<&str> = run.context.variables().iter().map(|v| v.name()).collect();
    assert_eq!(names, vec!["r", "A"]);
}

/// num() is expanded before the cell is evaluated
#[test]
fn test_num_macro_in_worksheet() {
    let context = Context::new().with_variable(Variable::numerical("k", ["2", "5"]));
    let run = run(&[r"y = num(k) + num(\sqrt{9})"], context);

    let outcome = &run.outcomes[0];
    assert_eq!(outcome.latex, "y = 2.00000000000000 + 3.00000000000000");
    assert_eq!(outcome.macros, vec!["Evaluate num() Functions"]);
    assert_eq!(outcome.visible_solutions, vec!["y = 5.0"]);
}

/// Malformed num() calls stay as written
#[test]
fn test_malformed_num_left_alone() {
    let run = run(&[r"num(\pi"], Context::new());
    assert_eq!(run.outcomes[0].latex, r"num(\pi");
}

/// A variable without values is free, and solving it replaces the entry
#[test]
fn test_empty_variable_is_replaced() {
    let context = Context::new()
        .with_variable(Variable::numerical("x", Vec::<String>::new()))
        .with_variable(Variable::numerical("k", ["3"]));
    let run = run(&["x^2 - 9", "x + k"], context);

    assert_eq!(solutions(&run), vec![vec!["x = -3.0", "x = 3.0"], vec!["0.0", "6.0"]]);
    let names: Vec<&str> = run.context.variables().iter().map(|v| v.name()).collect();
    assert_eq!(names, vec!["k", "x"]);
}

/// Bound variables turn a would-be root search into an evaluation
#[test]
fn test_bound_variable_is_evaluated() {
    let context = Context::new().with_variable(Variable::numerical("x", ["1"]));
    let run = run(&["x - 5"], context);
    assert_eq!(run.outcomes[0].plugin.as_deref(), Some("Numerical Evaluation"));
    assert_eq!(solutions(&run), vec![vec!["-4.0"]]);
}

/// Cells nothing applies to produce no output and keep the context
#[test]
fn test_unhandled_cells() {
    let run = run(&["x + y", "", "1 + 1"], Context::new());
    assert_eq!(run.unhandled(), 2);
    assert_eq!(solutions(&run)[2], vec!["2.0"]);
    assert!(run.context.is_empty());
}

/// Options reach the plug-ins through the registry
#[test]
fn test_custom_options() {
    let options = PluginOptions {
        decimals: 3,
        search: SearchOptions {
            initial_guesses: vec![1.0],
            ..SearchOptions::default()
        },
        ..PluginOptions::default()
    };
    let registry = PluginRegistry::with_builtins(&options);
    let run = Worksheet::from_latex([r"\frac{1}{3}", "x^2 - 2"]).run(&registry, Context::new());

    assert_eq!(run.outcomes[0].visible_solutions, vec!["0.333"]);
    // Only the positive root is reachable from 1; the bracket has no sign change
    assert_eq!(run.outcomes[1].visible_solutions, vec!["x = 1.414"]);
}

/// Identical input gives identical output
#[test]
fn test_runs_are_deterministic() {
    let context = Context::new().with_variable(Variable::analytical("c", ["sqrt(2)"]));
    let cells = [r"x^{2} = c", r"\sin\left(x\right) = 0", r"\cos\left(x\right)"];
    let first = run(&cells, context.clone());
    let second = run(&cells, context);
    assert_eq!(first, second);
}

#[cfg(feature = "serde")]
#[test]
fn test_run_serializes() {
    let run = run(&["x^2 - 4"], Context::new());
    let json = serde_json::to_value(&run).unwrap();
    assert_eq!(json["outcomes"][0]["plugin"], "Root Finder");
    assert_eq!(json["context"]["variables"][0]["type"], "numerical");
}
