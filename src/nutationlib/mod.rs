//! Nutation and obliquity of the ecliptic
//!
//! Low-precision nutation in longitude and obliquity, good to about 0.5"
//! over a few centuries around 1900, and the mean/true obliquity of the
//! ecliptic. Used to turn true geocentric places into apparent ones.

use crate::calendar::centuries_since_1900;
use crate::constants::DEG2RAD;
use crate::mathutils::{frac360, polynome};

/// Nutation in longitude and obliquity, degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutation {
    /// Nutation in longitude, Δψ
    pub dpsi: f64,
    /// Nutation in obliquity, Δε
    pub deps: f64,
}

/// Nutation at a given Julian date
pub fn nutation(jd: f64) -> Nutation {
    let t = centuries_since_1900(jd);
    let t2 = t * t;

    // Fundamental arguments, degrees
    let ls = 279.6967 + 3.03e-4 * t2 + frac360(100.0021358 * t); // Sun's mean longitude
    let ld = 270.4342 - 1.133e-3 * t2 + frac360(1336.855231 * t); // Moon's mean longitude
    let ms = 358.4758 - 1.5e-4 * t2 + frac360(99.99736056 * t); // Sun's mean anomaly
    let md = 296.1046 + 9.192e-3 * t2 + frac360(1325.552359 * t); // Moon's mean anomaly
    let nm = 259.1833 + 2.078e-3 * t2 - frac360(5.372616667 * t); // node longitude

    let tls = 2.0 * (ls * DEG2RAD);
    let tld = 2.0 * (ld * DEG2RAD);
    let ms = ms * DEG2RAD;
    let md = md * DEG2RAD;
    let nm = nm * DEG2RAD;
    let tnm = 2.0 * nm;

    // Series in arc-seconds
    let dpsi = (-17.2327 - 1.737e-2 * t) * nm.sin()
        + (-1.2729 - 1.3e-4 * t) * tls.sin()
        + 2.088e-1 * tnm.sin()
        - 2.037e-1 * tld.sin()
        + (1.261e-1 - 3.1e-4 * t) * ms.sin()
        + 6.75e-2 * md.sin()
        - (4.97e-2 - 1.2e-4 * t) * (tls + ms).sin()
        - 3.42e-2 * (tld - nm).sin()
        - 2.61e-2 * (tld + md).sin()
        + 2.14e-2 * (tls - ms).sin()
        - 1.49e-2 * (tls - tld + md).sin()
        + 1.24e-2 * (tls - nm).sin()
        + 1.14e-2 * (tld - md).sin();

    let deps = (9.21 + 9.1e-4 * t) * nm.cos()
        + (5.522e-1 - 2.9e-4 * t) * tls.cos()
        - 9.04e-2 * tnm.cos()
        + 8.84e-2 * tld.cos()
        + 2.16e-2 * (tls + ms).cos()
        + 1.83e-2 * (tld - nm).cos()
        + 1.13e-2 * (tld + md).cos()
        - 9.3e-3 * (tls - ms).cos()
        - 6.6e-3 * (tls - nm).cos();

    Nutation {
        dpsi: dpsi / 3600.0,
        deps: deps / 3600.0,
    }
}

/// Mean obliquity of the ecliptic, degrees
pub fn mean_obliquity(jd: f64) -> f64 {
    let t = centuries_since_1900(jd);
    polynome(t, &[23.452294, -1.30125e-2, -1.64e-6, 5.03e-7])
}

/// True obliquity of the ecliptic (mean obliquity plus nutation), degrees
pub fn true_obliquity(jd: f64, nut: &Nutation) -> f64 {
    mean_obliquity(jd) + nut.deps
}
