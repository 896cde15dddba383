//! Context substitution and Cartesian-product expansion
//!
//! Variables bound in the context feed later cells. A variable with several
//! values makes the cell run once per value, and several such variables
//! multiply: the cell runs once per element of the Cartesian product, with
//! the earliest variable in context order varying slowest.

use crate::error::{PluginError, PluginResult};
use alpha_solve_core::{Context, Variable};
use alpha_solve_latex::{evaluate, parse_plain, Bindings};
use std::collections::BTreeSet;

/// A context variable with its values evaluated to numbers
#[derive(Debug, Clone, PartialEq)]
pub struct NumericBinding {
    pub name: String,
    pub values: Vec<f64>,
}

/// Evaluate one stored value
///
/// Values are plain math text (`2`, `-0.5`, `sqrt(2)/2`, `2*pi`) whether the
/// variable is numerical or analytical.
pub fn value_to_number(variable: &Variable, value: &str) -> PluginResult<f64> {
    let invalid = |reason: String| PluginError::InvalidValue {
        name: variable.name().to_string(),
        value: value.to_string(),
        reason,
    };

    let expr = parse_plain(value).map_err(|e| invalid(e.to_string()))?;
    let number = evaluate(&expr, &Bindings::default()).map_err(|e| invalid(e.to_string()))?;
    if !number.is_finite() {
        return Err(invalid(format!("evaluates to {}", number)));
    }
    Ok(number)
}

/// Collect the context variables that `symbols` mentions, in context order
///
/// Undefined variables and the `exclude`d name are skipped.
///
/// # Errors
///
/// Fails on the first value that is not a finite number.
pub fn bound_values(
    context: &Context,
    symbols: &BTreeSet<String>,
    exclude: Option<&str>,
) -> PluginResult<Vec<NumericBinding>> {
    context
        .defined_variables()
        .filter(|var| symbols.contains(var.name()) && Some(var.name()) != exclude)
        .map(|var| {
            let values = var
                .values()
                .iter()
                .map(|value| value_to_number(var, value))
                .collect::<PluginResult<Vec<f64>>>()?;
            Ok(NumericBinding {
                name: var.name().to_string(),
                values,
            })
        })
        .collect()
}

/// Iterator over every combination of binding values
///
/// Yields the product in lexicographic order of value positions. An empty
/// binding list yields exactly one empty combination; a binding with no
/// values yields none.
pub struct Combinations<'a> {
    bindings: &'a [NumericBinding],
    indices: Vec<usize>,
    done: bool,
}

impl<'a> Combinations<'a> {
    pub fn new(bindings: &'a [NumericBinding]) -> Self {
        Self {
            bindings,
            indices: vec![0; bindings.len()],
            done: bindings.iter().any(|b| b.values.is_empty()),
        }
    }

    /// Total number of combinations
    pub fn count_all(bindings: &[NumericBinding]) -> usize {
        bindings.iter().map(|b| b.values.len()).product()
    }
}

impl Iterator for Combinations<'_> {
    type Item = Bindings;

    fn next(&mut self) -> Option<Bindings> {
        if self.done {
            return None;
        }

        let combination: Bindings = self
            .bindings
            .iter()
            .zip(&self.indices)
            .map(|(binding, &i)| (binding.name.clone(), binding.values[i]))
            .collect();

        // Advance like an odometer, rightmost position fastest
        self.done = true;
        for (pos, binding) in self.bindings.iter().enumerate().rev() {
            self.indices[pos] += 1;
            if self.indices[pos] < binding.values.len() {
                self.done = false;
                break;
            }
            self.indices[pos] = 0;
        }

        Some(combination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn binding(name: &str, values: &[f64]) -> NumericBinding {
        NumericBinding {
            name: name.to_string(),
            values: values.to_vec(),
        }
    }

    fn symbols(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_bound_values_follow_context_order() {
        let context = Context::new()
            .with_variable(Variable::numerical("b", ["1", "2"]))
            .with_variable(Variable::analytical("a", ["sqrt(4)"]))
            .with_variable(Variable::numerical("unused", ["9"]))
            .with_variable(Variable::numerical("empty", Vec::<String>::new()));

        let bound = bound_values(&context, &symbols(&["a", "b", "empty", "x"]), None).unwrap();
        assert_eq!(bound, vec![binding("b", &[1.0, 2.0]), binding("a", &[2.0])]);

        let bound = bound_values(&context, &symbols(&["a", "b"]), Some("b")).unwrap();
        assert_eq!(bound, vec![binding("a", &[2.0])]);
    }

    #[test]
    fn test_bad_value_is_an_error() {
        let context = Context::new().with_variable(Variable::numerical("a", ["abc("]));
        let result = bound_values(&context, &symbols(&["a"]), None);
        assert!(matches!(result, Err(PluginError::InvalidValue { .. })));
    }

    #[test]
    fn test_product_order() {
        let bindings = vec![binding("a", &[1.0, 2.0]), binding("b", &[10.0, 20.0, 30.0])];
        let pairs: Vec<(f64, f64)> = Combinations::new(&bindings)
            .map(|c| (c["a"], c["b"]))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (1.0, 10.0),
                (1.0, 20.0),
                (1.0, 30.0),
                (2.0, 10.0),
                (2.0, 20.0),
                (2.0, 30.0),
            ]
        );
    }

    #[test]
    fn test_empty_product() {
        let combos: Vec<Bindings> = Combinations::new(&[]).collect();
        assert_eq!(combos.len(), 1);
        assert!(combos[0].is_empty());

        let bindings = vec![binding("a", &[1.0]), binding("b", &[])];
        assert_eq!(Combinations::new(&bindings).count(), 0);
    }

    proptest! {
        #[test]
        fn product_size_matches(lengths in proptest::collection::vec(1usize..4, 0..4)) {
            let bindings: Vec<NumericBinding> = lengths
                .iter()
                .enumerate()
                .map(|(i, &n)| NumericBinding {
                    name: format!("v{}", i),
                    values: (0..n).map(|k| k as f64).collect(),
                })
                .collect();

            let combos: Vec<Bindings> = Combinations::new(&bindings).collect();
            prop_assert_eq!(combos.len(), Combinations::count_all(&bindings));

            // First variable varies slowest
            if let Some(first) = bindings.first() {
                let block = combos.len() / first.values.len();
                for (i, combo) in combos.iter().enumerate() {
                    prop_assert_eq!(combo["v0"], (i / block) as f64);
                }
            }
        }
    }
}
