//! Bracketed root search (Brent's method)
//!
//! Mixes bisection with secant and inverse quadratic interpolation steps.
//! The bracket must contain a sign change.

use crate::error::SearchError;

/// Bracketed search settings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Absolute tolerance on the root
    pub x_tolerance: f64,
    /// Relative tolerance on the root
    pub r_tolerance: f64,
    /// Maximum iterations
    pub max_iterations: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            x_tolerance: 2e-12,
            r_tolerance: 4.0 * f64::EPSILON,
            max_iterations: 100,
        }
    }
}

/// Find a root of `f` in `[a, b]`
///
/// # Errors
///
/// Returns [`SearchError::NoSignChange`] when `f(a)` and `f(b)` share a
/// sign, [`SearchError::NonFiniteResidual`] when `f` leaves the reals and
/// [`SearchError::NotConverged`] when the iteration budget runs out.
pub fn brentq<F>(mut f: F, a: f64, b: f64, config: &Config) -> Result<f64, SearchError>
where
    F: FnMut(f64) -> Result<f64, SearchError>,
{
    let mut eval = |x: f64| -> Result<f64, SearchError> {
        let fx = f(x)?;
        if fx.is_finite() {
            Ok(fx)
        } else {
            Err(SearchError::NonFiniteResidual { x })
        }
    };

    let (mut xpre, mut xcur) = (a, b);
    let mut fpre = eval(xpre)?;
    let mut fcur = eval(xcur)?;

    if fpre * fcur > 0.0 {
        return Err(SearchError::NoSignChange {
            a,
            b,
            fa: fpre,
            fb: fcur,
        });
    }
    if fpre == 0.0 {
        return Ok(xpre);
    }
    if fcur == 0.0 {
        return Ok(xcur);
    }

    // Contrapoint and step history
    let (mut xblk, mut fblk) = (0.0, 0.0);
    let (mut spre, mut scur) = (0.0, 0.0);

    for _ in 0..config.max_iterations {
        if fpre != 0.0 && fcur != 0.0 && fpre.is_sign_negative() != fcur.is_sign_negative() {
            xblk = xpre;
            fblk = fpre;
            spre = xcur - xpre;
            scur = spre;
        }
        if fblk.abs() < fcur.abs() {
            xpre = xcur;
            xcur = xblk;
            xblk = xpre;

            fpre = fcur;
            fcur = fblk;
            fblk = fpre;
        }

        let delta = (config.x_tolerance + config.r_tolerance * xcur.abs()) / 2.0;
        let sbis = (xblk - xcur) / 2.0;
        if fcur == 0.0 || sbis.abs() < delta {
            return Ok(xcur);
        }

        if spre.abs() > delta && fcur.abs() < fpre.abs() {
            let stry = if xpre == xblk {
                // Secant
                -fcur * (xcur - xpre) / (fcur - fpre)
            } else {
                // Inverse quadratic interpolation
                let dpre = (fpre - fcur) / (xpre - xcur);
                let dblk = (fblk - fcur) / (xblk - xcur);
                -fcur * (fblk * dblk - fpre * dpre) / (dblk * dpre * (fblk - fpre))
            };

            if 2.0 * stry.abs() < spre.abs().min(3.0 * sbis.abs() - delta) {
                spre = scur;
                scur = stry;
            } else {
                spre = sbis;
                scur = sbis;
            }
        } else {
            spre = sbis;
            scur = sbis;
        }

        xpre = xcur;
        fpre = fcur;
        if scur.abs() > delta {
            xcur += scur;
        } else {
            xcur += if sbis > 0.0 { delta } else { -delta };
        }

        fcur = eval(xcur)?;
    }

    Err(SearchError::NotConverged {
        iterations: config.max_iterations,
    })
}
