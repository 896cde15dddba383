//! Ordered, de-duplicated root collection

use crate::format::{format_float, round_to};
use ordered_float::OrderedFloat;
use std::collections::BTreeSet;

/// Roots rounded to a fixed number of decimals, kept in ascending order
///
/// Rounding happens before insertion, so two candidates that agree to the
/// configured precision count as the same root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootSet {
    decimals: u32,
    roots: BTreeSet<OrderedFloat<f64>>,
}

impl RootSet {
    pub fn new(decimals: u32) -> Self {
        Self {
            decimals,
            roots: BTreeSet::new(),
        }
    }

    /// Round and insert; returns false for duplicates and non-finite values
    pub fn insert(&mut self, root: f64) -> bool {
        if !root.is_finite() {
            return false;
        }
        self.roots.insert(OrderedFloat(round_to(root, self.decimals)))
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Roots in ascending order
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.roots.iter().map(|r| r.into_inner())
    }

    /// Roots as display text, ascending
    pub fn to_strings(&self) -> Vec<String> {
        self.iter().map(format_float).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rounded_duplicates_collapse() {
        let mut roots = RootSet::new(10);
        assert!(roots.insert(2.0000000000001));
        assert!(!roots.insert(1.99999999999999));
        assert!(roots.insert(-2.0));
        assert!(!roots.insert(f64::NAN));
        assert_eq!(roots.len(), 2);
        assert_eq!(roots.to_strings(), vec!["-2.0", "2.0"]);
    }

    #[test]
    fn test_negative_zero_is_zero() {
        let mut roots = RootSet::new(10);
        roots.insert(-1e-13);
        roots.insert(0.0);
        assert_eq!(roots.to_strings(), vec!["0.0"]);
    }

    #[test]
    fn test_prerounded_root_is_stable() {
        // Bracketed roots are rounded before they are inserted
        let mut roots = RootSet::new(10);
        assert!(roots.insert(round_to(318036.64508198807, 10)));
        assert!(!roots.insert(318036.6450819881));
        assert_eq!(roots.to_strings(), vec!["318036.6450819881"]);
    }
}
