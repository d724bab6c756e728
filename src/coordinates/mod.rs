//! Coordinate types for ecliptic and equatorial positions

use serde::{Deserialize, Serialize};

use crate::constants::{DEG2RAD, RAD2DEG};
use crate::mathutils::reduce_deg;

/// Position of a celestial body on the ecliptic plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EclipticPosition {
    /// Celestial longitude, degrees in [0, 360)
    pub lambda: f64,
    /// Celestial latitude, degrees
    pub beta: f64,
    /// Distance from Earth, astronomical units
    pub delta: f64,
}

impl EclipticPosition {
    /// Create a position, normalizing the longitude into [0, 360)
    pub fn new(lambda: f64, beta: f64, delta: f64) -> Self {
        Self {
            lambda: reduce_deg(lambda),
            beta,
            delta,
        }
    }
}

/// Equatorial coordinates: right ascension and declination, degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Equatorial {
    /// Right ascension, degrees in [0, 360)
    pub ra: f64,
    /// Declination, degrees
    pub dec: f64,
}

/// Convert ecliptic longitude/latitude to equatorial coordinates
///
/// `obliquity` is the obliquity of the ecliptic in degrees; pass the true
/// obliquity for apparent places.
pub fn ecliptic_to_equatorial(lambda: f64, beta: f64, obliquity: f64) -> Equatorial {
    let lam = lambda * DEG2RAD;
    let bet = beta * DEG2RAD;
    let eps = obliquity * DEG2RAD;

    let ra = (lam.sin() * eps.cos() - bet.tan() * eps.sin()).atan2(lam.cos());
    let dec = (bet.sin() * eps.cos() + bet.cos() * eps.sin() * lam.sin()).asin();

    Equatorial {
        ra: reduce_deg(ra * RAD2DEG),
        dec: dec * RAD2DEG,
    }
}
