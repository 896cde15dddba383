//! Expression syntax tree

use crate::evaluator::Bindings;
use crate::printer;
use std::collections::BTreeSet;
use std::fmt;

/// Expression AST
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    // === Literals ===
    /// Numeric literal
    Number(f64),
    /// Named mathematical constant
    Constant(Constant),

    /// Free symbol, e.g. `x`, `x_{1}` or `alpha`
    Symbol(String),

    // === Operators ===
    BinaryOp {
        op: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expr>,
    },

    // === Function call ===
    Function {
        name: String,
        args: Vec<Expr>,
    },
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
}

/// Mathematical constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn value(self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
        }
    }
}

impl Expr {
    pub fn symbol<S: Into<String>>(name: S) -> Self {
        Expr::Symbol(name.into())
    }

    pub fn binary(op: BinaryOperator, left: Expr, right: Expr) -> Self {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Negate, folding numeric literals
    pub fn negate(operand: Expr) -> Self {
        match operand {
            Expr::Number(n) => Expr::Number(-n),
            other => Expr::UnaryOp {
                op: UnaryOperator::Negate,
                operand: Box::new(other),
            },
        }
    }

    pub fn function<S: Into<String>>(name: S, args: Vec<Expr>) -> Self {
        Expr::Function {
            name: name.into(),
            args,
        }
    }

    /// Names of every symbol in the expression, sorted
    pub fn free_symbols(&self) -> BTreeSet<String> {
        let mut symbols = BTreeSet::new();
        self.collect_symbols(&mut symbols);
        symbols
    }

    fn collect_symbols(&self, out: &mut BTreeSet<String>) {
        match self {
            Expr::Number(_) | Expr::Constant(_) => {}
            Expr::Symbol(name) => {
                out.insert(name.clone());
            }
            Expr::BinaryOp { left, right, .. } => {
                left.collect_symbols(out);
                right.collect_symbols(out);
            }
            Expr::UnaryOp { operand, .. } => operand.collect_symbols(out),
            Expr::Function { args, .. } => {
                for arg in args {
                    arg.collect_symbols(out);
                }
            }
        }
    }

    /// True when the expression mentions `name`
    pub fn contains_symbol(&self, name: &str) -> bool {
        match self {
            Expr::Number(_) | Expr::Constant(_) => false,
            Expr::Symbol(s) => s == name,
            Expr::BinaryOp { left, right, .. } => {
                left.contains_symbol(name) || right.contains_symbol(name)
            }
            Expr::UnaryOp { operand, .. } => operand.contains_symbol(name),
            Expr::Function { args, .. } => args.iter().any(|a| a.contains_symbol(name)),
        }
    }

    /// Replace every bound symbol with its numeric value
    pub fn substitute(&self, bindings: &Bindings) -> Expr {
        match self {
            Expr::Symbol(name) => match bindings.get(name) {
                Some(value) => Expr::Number(*value),
                None => self.clone(),
            },
            Expr::Number(_) | Expr::Constant(_) => self.clone(),
            Expr::BinaryOp { op, left, right } => {
                Expr::binary(*op, left.substitute(bindings), right.substitute(bindings))
            }
            Expr::UnaryOp { op, operand } => Expr::UnaryOp {
                op: *op,
                operand: Box::new(operand.substitute(bindings)),
            },
            Expr::Function { name, args } => Expr::Function {
                name: name.clone(),
                args: args.iter().map(|a| a.substitute(bindings)).collect(),
            },
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&printer::to_latex(self))
    }
}

/// A parsed cell: either a plain expression or an equation
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expression(Expr),
    Equation { lhs: Expr, rhs: Expr },
}

impl Statement {
    pub fn is_equation(&self) -> bool {
        matches!(self, Statement::Equation { .. })
    }

    /// The expression, if this is not an equation
    pub fn as_expression(&self) -> Option<&Expr> {
        match self {
            Statement::Expression(expr) => Some(expr),
            Statement::Equation { .. } => None,
        }
    }

    /// Zero form of an equation, `lhs - rhs`
    pub fn residual(&self) -> Option<Expr> {
        match self {
            Statement::Equation { lhs, rhs } => Some(Expr::binary(
                BinaryOperator::Subtract,
                lhs.clone(),
                rhs.clone(),
            )),
            Statement::Expression(_) => None,
        }
    }

    pub fn free_symbols(&self) -> BTreeSet<String> {
        match self {
            Statement::Expression(expr) => expr.free_symbols(),
            Statement::Equation { lhs, rhs } => {
                let mut symbols = lhs.free_symbols();
                symbols.extend(rhs.free_symbols());
                symbols
            }
        }
    }

    pub fn to_latex(&self) -> String {
        match self {
            Statement::Expression(expr) => printer::to_latex(expr),
            Statement::Equation { lhs, rhs } => {
                format!("{} = {}", printer::to_latex(lhs), printer::to_latex(rhs))
            }
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_latex())
    }
}
