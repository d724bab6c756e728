//! Orrery: classical ephemeris calculations for the Sun, Moon and planets
//!
//! This crate computes apparent geocentric ecliptic positions (longitude,
//! latitude, distance) of the major solar system bodies for an arbitrary
//! epoch, using classical perturbation-series orbital mechanics. Accuracy is
//! of the order of an arc-minute for the planets: enough for almanacs,
//! charts and rise/set work, well short of VSOP87 or the JPL integrations.
//!
//! The usual entry point is [`EphemerisContext`], a per-epoch facade that
//! owns shared quantities (solar position, nutation, obliquity) and
//! memoizes per-body results:
//!
//! ```
//! use orrery::EphemerisContext;
//!
//! // 1984 August 24, 00:00 UT
//! let ctx = EphemerisContext::new(2445936.5, false, false);
//! let mars = ctx.position("Mars").unwrap();
//! println!("Mars: lon {:.4} lat {:.4} dist {:.4} AU", mars.lambda, mars.beta, mars.delta);
//! ```

use thiserror::Error;

pub mod calendar;
pub mod constants;
pub mod coordinates;
pub mod ephemlib;
pub mod keplerlib;
pub mod mathutils;
pub mod moonlib;
pub mod nutationlib;
pub mod planetlib;
pub mod sunlib;

// Re-export commonly used types
pub use coordinates::EclipticPosition;
pub use ephemlib::{Body, EphemerisContext};
pub use planetlib::Planet;

/// Main error type for the orrery library
#[derive(Debug, Error)]
pub enum OrreryError {
    #[error("Kepler iteration failed to converge after {0} steps")]
    Convergence(usize),

    #[error("Unknown body: {0}")]
    UnknownBody(String),

    #[error("Eccentricity {0} is outside the elliptical range [0, 1)")]
    InvalidEccentricity(f64),
}

/// Result type for orrery operations
pub type Result<T> = std::result::Result<T, OrreryError>;
