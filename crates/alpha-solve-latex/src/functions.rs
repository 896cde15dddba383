//! Built-in elementary functions

use ahash::AHashMap;
use std::sync::OnceLock;

/// Function implementation signature
///
/// Arguments arrive already evaluated and count-checked. Domain errors
/// produce NaN rather than failing, matching IEEE arithmetic.
pub type FunctionImpl = fn(&[f64]) -> f64;

/// Function definition
pub struct FunctionDef {
    /// Canonical name stored in the AST
    pub name: &'static str,
    /// Other names accepted by the parsers (LaTeX commands or plain text)
    pub aliases: &'static [&'static str],
    /// LaTeX command used when printing
    pub latex: &'static str,
    /// Minimum arguments
    pub min_args: usize,
    /// Maximum arguments
    pub max_args: usize,
    /// Implementation
    pub implementation: FunctionImpl,
}

/// Function registry
pub struct FunctionRegistry {
    functions: Vec<FunctionDef>,
    by_name: AHashMap<&'static str, usize>,
}

static FUNCTION_REGISTRY: OnceLock<FunctionRegistry> = OnceLock::new();

/// Global function registry (lazily initialized)
pub fn registry() -> &'static FunctionRegistry {
    FUNCTION_REGISTRY.get_or_init(FunctionRegistry::new)
}

/// Look up a function by canonical name or alias
pub fn lookup(name: &str) -> Option<&'static FunctionDef> {
    registry().get(name)
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionRegistry {
    /// Create a new registry with all built-in functions
    pub fn new() -> Self {
        let mut registry = Self {
            functions: Vec::new(),
            by_name: AHashMap::new(),
        };

        registry.register_trigonometric_functions();
        registry.register_exponential_functions();
        registry.register_rounding_functions();

        registry
    }

    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.by_name.get(name).map(|&i| &self.functions[i])
    }

    /// Register a function under its name and aliases
    pub fn register(&mut self, def: FunctionDef) {
        let index = self.functions.len();
        self.by_name.insert(def.name, index);
        for alias in def.aliases {
            self.by_name.insert(*alias, index);
        }
        self.functions.push(def);
    }

    fn unary(&mut self, name: &'static str, latex: &'static str, implementation: FunctionImpl) {
        self.register(FunctionDef {
            name,
            aliases: &[],
            latex,
            min_args: 1,
            max_args: 1,
            implementation,
        });
    }

    fn register_trigonometric_functions(&mut self) {
        self.unary("sin", r"\sin", |a| a[0].sin());
        self.unary("cos", r"\cos", |a| a[0].cos());
        self.unary("tan", r"\tan", |a| a[0].tan());
        self.unary("cot", r"\cot", |a| 1.0 / a[0].tan());
        self.unary("sec", r"\sec", |a| 1.0 / a[0].cos());
        self.unary("csc", r"\csc", |a| 1.0 / a[0].sin());
        self.unary("sinh", r"\sinh", |a| a[0].sinh());
        self.unary("cosh", r"\cosh", |a| a[0].cosh());
        self.unary("tanh", r"\tanh", |a| a[0].tanh());

        self.register(FunctionDef {
            name: "asin",
            aliases: &["arcsin"],
            latex: r"\arcsin",
            min_args: 1,
            max_args: 1,
            implementation: |a| a[0].asin(),
        });
        self.register(FunctionDef {
            name: "acos",
            aliases: &["arccos"],
            latex: r"\arccos",
            min_args: 1,
            max_args: 1,
            implementation: |a| a[0].acos(),
        });
        self.register(FunctionDef {
            name: "atan",
            aliases: &["arctan"],
            latex: r"\arctan",
            min_args: 1,
            max_args: 1,
            implementation: |a| a[0].atan(),
        });
    }

    fn register_exponential_functions(&mut self) {
        self.unary("exp", r"\exp", |a| a[0].exp());
        self.unary("ln", r"\ln", |a| a[0].ln());
        self.unary("sqrt", r"\sqrt", |a| a[0].sqrt());

        // log(x) is natural; log(x, b) uses base b
        self.register(FunctionDef {
            name: "log",
            aliases: &[],
            latex: r"\log",
            min_args: 1,
            max_args: 2,
            implementation: fn_log,
        });

        // root(x, n) - n-th root, real for odd n and negative x
        self.register(FunctionDef {
            name: "root",
            aliases: &[],
            latex: r"\sqrt",
            min_args: 2,
            max_args: 2,
            implementation: fn_root,
        });
    }

    fn register_rounding_functions(&mut self) {
        self.register(FunctionDef {
            name: "abs",
            aliases: &["Abs"],
            latex: r"\operatorname{abs}",
            min_args: 1,
            max_args: 1,
            implementation: |a| a[0].abs(),
        });
        self.unary("floor", r"\operatorname{floor}", |a| a[0].floor());
        self.register(FunctionDef {
            name: "ceil",
            aliases: &["ceiling"],
            latex: r"\operatorname{ceil}",
            min_args: 1,
            max_args: 1,
            implementation: |a| a[0].ceil(),
        });
    }
}

fn fn_log(args: &[f64]) -> f64 {
    match args {
        [x] => x.ln(),
        [x, base] => x.ln() / base.ln(),
        _ => f64::NAN,
    }
}

fn fn_root(args: &[f64]) -> f64 {
    let (x, n) = (args[0], args[1]);
    let odd_integer = n.fract() == 0.0 && (n as i64) % 2 != 0;
    if x < 0.0 && odd_integer {
        -(-x).powf(1.0 / n)
    } else {
        x.powf(1.0 / n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_alias() {
        let def = lookup("arcsin").unwrap();
        assert_eq!(def.name, "asin");
        assert_eq!(def.latex, r"\arcsin");
        assert!(lookup("nosuchfunction").is_none());
    }

    #[test]
    fn test_log_bases() {
        let log = lookup("log").unwrap();
        assert!(((log.implementation)(&[std::f64::consts::E]) - 1.0).abs() < 1e-12);
        assert!(((log.implementation)(&[8.0, 2.0]) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_root_of_negative() {
        assert!((fn_root(&[-8.0, 3.0]) + 2.0).abs() < 1e-12);
        assert!(fn_root(&[-16.0, 4.0]).is_nan());
        assert!((fn_root(&[16.0, 4.0]) - 2.0).abs() < 1e-12);
    }
}
