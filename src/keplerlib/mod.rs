//! Kepler equation solver for elliptical motion
//!
//! Converts mean anomaly to eccentric and true anomaly by Newton-Raphson
//! iteration on Kepler's equation `E - e·sin E = M`.

use crate::{OrreryError, Result};

/// Absolute tolerance on the Kepler residual, radians
const TOLERANCE: f64 = 1e-7;

/// Iteration cap; Newton-Raphson converges in a handful of steps for any
/// elliptical eccentricity, so hitting this indicates bad input.
const MAX_ITERATIONS: usize = 60;

/// Solve Kepler's equation for the eccentric anomaly `ea`, given
/// eccentricity `s` (0 ≤ s < 1) and mean anomaly `m`. All angular values
/// are in radians.
pub fn eccentric_anomaly(s: f64, m: f64) -> Result<f64> {
    if !(0.0..1.0).contains(&s) {
        return Err(OrreryError::InvalidEccentricity(s));
    }

    let mut ea = m;
    for _ in 0..MAX_ITERATIONS {
        let dla = ea - s * ea.sin() - m;
        if dla.abs() < TOLERANCE {
            return Ok(ea);
        }
        ea -= dla / (1.0 - s * ea.cos());
    }

    Err(OrreryError::Convergence(MAX_ITERATIONS))
}

/// Given eccentricity `s` and eccentric anomaly `ea`, find the true anomaly.
/// All angular values are in radians.
pub fn true_anomaly(s: f64, ea: f64) -> f64 {
    2.0 * (((1.0 + s) / (1.0 - s)).sqrt() * (ea / 2.0).tan()).atan()
}
