//! Plug-in configuration

use crate::search::{brent, newton};

/// Options for the numeric root search shared by root finding and
/// equation solving
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchOptions {
    /// Starting points for the local search, tried in order
    pub initial_guesses: Vec<f64>,
    /// Interval for the bracketed search
    pub bracket: [f64; 2],
    /// A candidate is accepted when `|f(x)|` is below this
    pub residual_tolerance: f64,
    /// Local (Newton) search settings
    pub newton: newton::Config,
    /// Bracketed (Brent) search settings
    pub brent: brent::Config,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            initial_guesses: vec![-100.0, -10.0, -1.0, 0.0, 1.0, 10.0, 100.0],
            bracket: [-1000.0, 1000.0],
            residual_tolerance: 1e-6,
            newton: newton::Config::default(),
            brent: brent::Config::default(),
        }
    }
}

/// Options for the `num()` macro
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MacroOptions {
    /// Significant digits of the inlined value
    pub significant_digits: usize,
}

impl Default for MacroOptions {
    fn default() -> Self {
        Self {
            significant_digits: 15,
        }
    }
}

/// Options for the built-in plug-ins
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PluginOptions {
    /// Decimal places kept in evaluated values and roots
    pub decimals: u32,
    pub search: SearchOptions,
    pub num_macro: MacroOptions,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            decimals: 10,
            search: SearchOptions::default(),
            num_macro: MacroOptions::default(),
        }
    }
}
