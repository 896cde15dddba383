//! Local root search from a starting point
//!
//! Damped Newton iteration with a forward-difference derivative. Like a
//! hybrid `fsolve`, it hands back the best iterate it reached whether or
//! not the step size converged; callers decide acceptance from the residual.

use crate::error::SearchError;

/// Smallest step fraction tried while backtracking
const MIN_DAMPING: f64 = 1e-10;

/// Step taken, relative to `max(1, |x|)`, when the slope is flat or unusable
const NUDGE: f64 = 1e-2;

/// Local search settings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Maximum Newton steps
    pub max_iterations: usize,
    /// Stop once a step is smaller than this, relative to `max(1, |x|)`
    pub x_tolerance: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            x_tolerance: 1.49012e-8,
        }
    }
}

/// Drive `f` towards zero starting at `x0`
///
/// # Errors
///
/// Fails only when `f` itself fails or is not finite at `x0`.
pub fn local_root<F>(mut f: F, x0: f64, config: &Config) -> Result<f64, SearchError>
where
    F: FnMut(f64) -> Result<f64, SearchError>,
{
    let mut x = x0;
    let mut fx = f(x)?;
    if !fx.is_finite() {
        return Err(SearchError::NonFiniteResidual { x });
    }

    for iter in 0..config.max_iterations {
        if fx == 0.0 {
            break;
        }

        let scale = x.abs().max(1.0);
        let h = f64::EPSILON.sqrt() * scale;
        let slope = match f(x + h) {
            Ok(fh) => (fh - fx) / h,
            Err(_) => f64::NAN,
        };

        let step = if slope.is_finite() && slope != 0.0 {
            fx / slope
        } else {
            -NUDGE * scale
        };

        // Backtrack until the residual shrinks
        let mut damping = 1.0;
        let accepted = loop {
            let candidate = x - damping * step;
            if let Ok(fc) = f(candidate) {
                if fc.is_finite() && fc.abs() < fx.abs() {
                    break Some((candidate, fc));
                }
            }
            damping *= 0.5;
            if damping < MIN_DAMPING {
                break None;
            }
        };

        let Some((next, f_next)) = accepted else {
            tracing::trace!(x, fx, iter, "local search stalled");
            break;
        };

        let moved = (next - x).abs();
        x = next;
        fx = f_next;
        if moved <= config.x_tolerance * x.abs().max(1.0) {
            break;
        }
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(f: impl Fn(f64) -> f64) -> impl FnMut(f64) -> Result<f64, SearchError> {
        move |x| Ok(f(x))
    }

    #[test]
    fn test_quadratic_from_both_sides() {
        let config = Config::default();
        let right = local_root(ok(|x| x * x - 4.0), 10.0, &config).unwrap();
        let left = local_root(ok(|x| x * x - 4.0), -10.0, &config).unwrap();
        assert!((right - 2.0).abs() < 1e-9, "{}", right);
        assert!((left + 2.0).abs() < 1e-9, "{}", left);
    }

    #[test]
    fn test_start_on_flat_point() {
        // Derivative of x^2 - 4 vanishes at 0
        let root = local_root(ok(|x| x * x - 4.0), 0.0, &Config::default()).unwrap();
        assert!((root.abs() - 2.0).abs() < 1e-9, "{}", root);
    }

    #[test]
    fn test_far_start_linear() {
        let root = local_root(ok(|x| x - 4.0), -100.0, &Config::default()).unwrap();
        assert!((root - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_root_returns_best_iterate() {
        let x = local_root(ok(|x| x * x + 1.0), 3.0, &Config::default()).unwrap();
        assert!((x * x + 1.0) >= 1.0);
    }

    #[test]
    fn test_non_finite_start() {
        let result = local_root(ok(|x| 1.0 / x), 0.0, &Config::default());
        assert_eq!(result, Err(SearchError::NonFiniteResidual { x: 0.0 }));
    }
}
