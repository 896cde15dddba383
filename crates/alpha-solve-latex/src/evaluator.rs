//! Numeric evaluator
//!
//! Evaluates expression ASTs to `f64` under a set of symbol bindings.

use crate::ast::{BinaryOperator, Expr, UnaryOperator};
use crate::error::{LatexError, LatexResult};
use crate::functions;
use ahash::AHashMap;

/// Symbol name → numeric value
pub type Bindings = AHashMap<String, f64>;

/// Evaluate an expression numerically
///
/// Arithmetic follows IEEE-754: `1/0` is infinite and `\sqrt{-1}` is NaN.
/// Evaluation only fails for symbols missing from `bindings` and for
/// unknown functions or wrong argument counts.
pub fn evaluate(expr: &Expr, bindings: &Bindings) -> LatexResult<f64> {
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::Constant(c) => Ok(c.value()),
        Expr::Symbol(name) => bindings
            .get(name)
            .copied()
            .ok_or_else(|| LatexError::UnboundSymbol(name.clone())),
        Expr::BinaryOp { op, left, right } => {
            let left = evaluate(left, bindings)?;
            let right = evaluate(right, bindings)?;
            Ok(evaluate_binary_op(*op, left, right))
        }
        Expr::UnaryOp { op, operand } => {
            let value = evaluate(operand, bindings)?;
            Ok(match op {
                UnaryOperator::Negate => -value,
            })
        }
        Expr::Function { name, args } => evaluate_function(name, args, bindings),
    }
}

fn evaluate_binary_op(op: BinaryOperator, left: f64, right: f64) -> f64 {
    match op {
        BinaryOperator::Add => left + right,
        BinaryOperator::Subtract => left - right,
        BinaryOperator::Multiply => left * right,
        BinaryOperator::Divide => left / right,
        BinaryOperator::Power => power(left, right),
    }
}

fn power(base: f64, exponent: f64) -> f64 {
    if exponent.fract() == 0.0 && exponent.abs() <= i32::MAX as f64 {
        base.powi(exponent as i32)
    } else {
        base.powf(exponent)
    }
}

fn evaluate_function(name: &str, args: &[Expr], bindings: &Bindings) -> LatexResult<f64> {
    let def =
        functions::lookup(name).ok_or_else(|| LatexError::UnknownFunction(name.to_string()))?;

    if args.len() < def.min_args || args.len() > def.max_args {
        let expected = if def.min_args == def.max_args {
            def.min_args.to_string()
        } else {
            format!("{}-{}", def.min_args, def.max_args)
        };
        return Err(LatexError::ArgumentCount {
            function: def.name.to_string(),
            expected,
            actual: args.len(),
        });
    }

    let values = args
        .iter()
        .map(|arg| evaluate(arg, bindings))
        .collect::<LatexResult<Vec<f64>>>()?;

    Ok((def.implementation)(&values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_latex, parse_plain};

    fn eval(latex: &str) -> LatexResult<f64> {
        let statement = parse_latex(latex)?;
        let expr = statement.as_expression().expect("not an equation");
        evaluate(expr, &Bindings::default())
    }

    fn eval_with(latex: &str, pairs: &[(&str, f64)]) -> LatexResult<f64> {
        let statement = parse_latex(latex)?;
        let bindings: Bindings = pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        evaluate(statement.as_expression().unwrap(), &bindings)
    }

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_evaluate_arithmetic() {
        assert_eq!(eval("1+2").unwrap(), 3.0);
        assert_eq!(eval("2\\cdot 3 - 4").unwrap(), 2.0);
        assert_eq!(eval("\\frac{1}{4}").unwrap(), 0.25);
        assert_eq!(eval("2^{10}").unwrap(), 1024.0);
        assert_eq!(eval("-3^2").unwrap(), -9.0);
    }

    #[test]
    fn test_evaluate_precedence() {
        assert_eq!(eval("1+2\\times 3").unwrap(), 7.0);
        assert_eq!(eval("(1+2)3").unwrap(), 9.0);
        assert_eq!(eval("2^{3^{2}}").unwrap(), 512.0);
    }

    #[test]
    fn test_evaluate_constants_and_functions() {
        assert_approx(eval("\\pi").unwrap(), std::f64::consts::PI);
        assert_approx(eval("\\sin\\left(\\frac{\\pi}{2}\\right)").unwrap(), 1.0);
        assert_approx(eval("\\sqrt{16}").unwrap(), 4.0);
        assert_approx(eval("\\sqrt[3]{27}").unwrap(), 3.0);
        assert_approx(eval("\\ln\\left(\\mathrm{e}\\right)").unwrap(), 1.0);
        assert_approx(eval("\\log_{2} 8").unwrap(), 3.0);
        assert_approx(eval("|-5|").unwrap(), 5.0);
    }

    #[test]
    fn test_evaluate_with_bindings() {
        assert_eq!(eval_with("x^2", &[("x", 3.0)]).unwrap(), 9.0);
        assert_eq!(eval_with("2x + y", &[("x", 1.5), ("y", 1.0)]).unwrap(), 4.0);
        assert_eq!(eval_with("x_1 x_2", &[("x_{1}", 2.0), ("x_{2}", 5.0)]).unwrap(), 10.0);
    }

    #[test]
    fn test_evaluate_ieee_semantics() {
        assert!(eval("\\frac{1}{0}").unwrap().is_infinite());
        assert!(eval("\\sqrt{-1}").unwrap().is_nan());
    }

    #[test]
    fn test_evaluate_unbound_symbol() {
        assert_eq!(
            eval("x + 1"),
            Err(LatexError::UnboundSymbol("x".to_string()))
        );
    }

    #[test]
    fn test_evaluate_argument_count() {
        let expr = Expr::function("sin", vec![Expr::Number(1.0), Expr::Number(2.0)]);
        assert!(matches!(
            evaluate(&expr, &Bindings::default()),
            Err(LatexError::ArgumentCount { actual: 2, .. })
        ));

        let expr = Expr::function("gamma", vec![Expr::Number(1.0)]);
        assert!(matches!(
            evaluate(&expr, &Bindings::default()),
            Err(LatexError::UnknownFunction(_))
        ));
    }

    #[test]
    fn test_evaluate_plain_values() {
        let expr = parse_plain("sqrt(2)/2").unwrap();
        assert_approx(
            evaluate(&expr, &Bindings::default()).unwrap(),
            std::f64::consts::FRAC_1_SQRT_2,
        );
        let expr = parse_plain("2**3 + pi - pi").unwrap();
        assert_approx(evaluate(&expr, &Bindings::default()).unwrap(), 8.0);
        let expr = parse_plain("2**3**2").unwrap();
        assert_approx(evaluate(&expr, &Bindings::default()).unwrap(), 512.0);
    }
}
