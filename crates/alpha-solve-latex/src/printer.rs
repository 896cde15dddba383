//! LaTeX output for expressions

use crate::ast::{BinaryOperator, Constant, Expr, UnaryOperator};
use crate::functions;
use crate::parser::is_greek_letter;

/// Binding strength used to decide where parentheses are needed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Additive,
    Multiplicative,
    Unary,
    Power,
    Atom,
}

/// Render an expression as LaTeX
///
/// The output parses back into an equivalent expression with
/// [`parse_latex`](crate::parse_latex).
pub fn to_latex(expr: &Expr) -> String {
    let mut out = String::new();
    write_expr(expr, &mut out);
    out
}

/// Format a number the way LaTeX input would spell it
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return r"\mathrm{NaN}".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { r"\infty" } else { r"-\infty" }.to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        // Avoid "-0"
        return format!("{}", (n as i64));
    }
    format!("{}", n)
}

fn precedence(expr: &Expr) -> Precedence {
    match expr {
        Expr::Number(n) if *n < 0.0 => Precedence::Unary,
        Expr::Number(_) | Expr::Constant(_) | Expr::Symbol(_) | Expr::Function { .. } => {
            Precedence::Atom
        }
        Expr::UnaryOp { .. } => Precedence::Unary,
        Expr::BinaryOp { op, .. } => match op {
            BinaryOperator::Add | BinaryOperator::Subtract => Precedence::Additive,
            // \frac{}{} is self-delimiting
            BinaryOperator::Divide => Precedence::Atom,
            BinaryOperator::Multiply => Precedence::Multiplicative,
            BinaryOperator::Power => Precedence::Power,
        },
    }
}

fn write_expr(expr: &Expr, out: &mut String) {
    match expr {
        Expr::Number(n) => out.push_str(&format_number(*n)),
        Expr::Constant(Constant::Pi) => out.push_str(r"\pi"),
        Expr::Constant(Constant::E) => out.push('e'),
        Expr::Symbol(name) => write_symbol(name, out),
        Expr::UnaryOp {
            op: UnaryOperator::Negate,
            operand,
        } => {
            out.push('-');
            write_operand(operand, Precedence::Unary, out);
        }
        Expr::BinaryOp { op, left, right } => write_binary(*op, left, right, out),
        Expr::Function { name, args } => write_function(name, args, out),
    }
}

fn write_binary(op: BinaryOperator, left: &Expr, right: &Expr, out: &mut String) {
    match op {
        BinaryOperator::Add => {
            write_expr(left, out);
            match negated(right) {
                Some(magnitude) => {
                    out.push_str(" - ");
                    write_operand_strict(&magnitude, Precedence::Additive, out);
                }
                None => {
                    out.push_str(" + ");
                    write_expr(right, out);
                }
            }
        }
        BinaryOperator::Subtract => {
            write_expr(left, out);
            out.push_str(" - ");
            write_operand_strict(right, Precedence::Additive, out);
        }
        BinaryOperator::Multiply => {
            write_operand(left, Precedence::Multiplicative, out);
            // "2 x" rather than "2 \cdot x"
            if matches!(left, Expr::Number(n) if *n >= 0.0)
                && matches!(right, Expr::Symbol(_) | Expr::Constant(_))
            {
                out.push(' ');
            } else {
                out.push_str(r" \cdot ");
            }
            write_operand_strict(right, Precedence::Multiplicative, out);
        }
        BinaryOperator::Divide => {
            out.push_str(r"\frac{");
            write_expr(left, out);
            out.push_str("}{");
            write_expr(right, out);
            out.push('}');
        }
        BinaryOperator::Power => {
            write_operand_strict(left, Precedence::Power, out);
            out.push_str("^{");
            write_expr(right, out);
            out.push('}');
        }
    }
}

/// `a + (-b)` prints as `a - b`
fn negated(expr: &Expr) -> Option<Expr> {
    match expr {
        Expr::Number(n) if *n < 0.0 => Some(Expr::Number(-n)),
        Expr::UnaryOp {
            op: UnaryOperator::Negate,
            operand,
        } => Some((**operand).clone()),
        _ => None,
    }
}

/// Write, parenthesizing anything that binds looser than `min`
fn write_operand(expr: &Expr, min: Precedence, out: &mut String) {
    if precedence(expr) < min {
        write_parenthesized(expr, out);
    } else {
        write_expr(expr, out);
    }
}

/// Write, parenthesizing anything that binds no tighter than `min`
fn write_operand_strict(expr: &Expr, min: Precedence, out: &mut String) {
    if precedence(expr) <= min {
        write_parenthesized(expr, out);
    } else {
        write_expr(expr, out);
    }
}

fn write_parenthesized(expr: &Expr, out: &mut String) {
    out.push_str(r"\left(");
    write_expr(expr, out);
    out.push_str(r"\right)");
}

fn write_symbol(name: &str, out: &mut String) {
    let (base, subscript) = match name.split_once("_{") {
        Some((base, rest)) => (base, Some(rest)),
        None => (name, None),
    };

    if is_greek_letter(base) {
        out.push('\\');
        out.push_str(base);
    } else if base.chars().count() > 1 {
        out.push_str(r"\mathrm{");
        out.push_str(base);
        out.push('}');
    } else {
        out.push_str(base);
    }

    if let Some(rest) = subscript {
        out.push_str("_{");
        out.push_str(rest);
    }
}

fn write_function(name: &str, args: &[Expr], out: &mut String) {
    match (name, args) {
        ("sqrt", [x]) => {
            out.push_str(r"\sqrt{");
            write_expr(x, out);
            out.push('}');
        }
        ("root", [x, n]) => {
            out.push_str(r"\sqrt[");
            write_expr(n, out);
            out.push_str("]{");
            write_expr(x, out);
            out.push('}');
        }
        ("abs", [x]) => {
            out.push_str(r"\left|");
            write_expr(x, out);
            out.push_str(r"\right|");
        }
        ("log", [x, base]) => {
            out.push_str(r"\log_{");
            write_expr(base, out);
            out.push('}');
            write_parenthesized(x, out);
        }
        _ => {
            match functions::lookup(name) {
                Some(def) => out.push_str(def.latex),
                None => {
                    out.push_str(r"\operatorname{");
                    out.push_str(name);
                    out.push('}');
                }
            }
            out.push_str(r"\left(");
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_expr(arg, out);
            }
            out.push_str(r"\right)");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_latex;
    use pretty_assertions::assert_eq;

    fn reprint(latex: &str) -> String {
        parse_latex(latex).unwrap().to_latex()
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(f64::INFINITY), r"\infty");
        assert_eq!(format_number(f64::NAN), r"\mathrm{NaN}");
    }

    #[test]
    fn test_print_arithmetic() {
        assert_eq!(reprint("x^2 - 4"), "x^{2} - 4");
        assert_eq!(reprint("2x + 1"), "2 x + 1");
        assert_eq!(reprint("a - (b - c)"), r"a - \left(b - c\right)");
        assert_eq!(reprint("(a + b) c"), r"\left(a + b\right) \cdot c");
        assert_eq!(reprint(r"\frac{1}{x+1}"), r"\frac{1}{x + 1}");
        assert_eq!(reprint("x + a = 5"), "x + a = 5");
    }

    #[test]
    fn test_print_powers() {
        assert_eq!(reprint("(x+1)^2"), r"\left(x + 1\right)^{2}");
        assert_eq!(reprint("(-2)^2"), r"\left(-2\right)^{2}");
        assert_eq!(reprint("-x^2"), "-x^{2}");
    }

    #[test]
    fn test_print_functions() {
        assert_eq!(reprint(r"\sin x"), r"\sin\left(x\right)");
        assert_eq!(reprint(r"\sqrt{x}"), r"\sqrt{x}");
        assert_eq!(reprint(r"\sqrt[3]{x}"), r"\sqrt[3]{x}");
        assert_eq!(reprint("|x|"), r"\left|x\right|");
        assert_eq!(reprint(r"\log_{2} x"), r"\log_{2}\left(x\right)");
        assert_eq!(reprint(r"\arcsin x"), r"\arcsin\left(x\right)");
    }

    #[test]
    fn test_print_symbols() {
        assert_eq!(reprint(r"\theta_1"), r"\theta_{1}");
        assert_eq!(reprint("x_{12}"), "x_{12}");
        assert_eq!(reprint(r"\pi"), r"\pi");
        assert_eq!(
            to_latex(&Expr::symbol("speed")),
            r"\mathrm{speed}"
        );
    }

    #[test]
    fn test_printed_latex_parses_back() {
        for latex in [
            r"\frac{x^{2}}{2} + 1",
            r"\sqrt[3]{x - 1} \cdot \sin\left(2 x\right)",
            r"\left|a - b\right|^{3}",
            r"-\left(x + y\right)",
            r"\alpha_{0} \cdot \mathrm{rate}",
        ] {
            let first = parse_latex(latex).unwrap();
            let second = parse_latex(&first.to_latex()).unwrap();
            assert_eq!(first, second, "{}", latex);
        }
    }
}
