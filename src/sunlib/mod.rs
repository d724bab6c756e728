//! Geocentric position of the Sun
//!
//! True geocentric longitude and radius-vector from the solar orbital
//! elements with the classical five-term perturbation corrections, plus the
//! apparent place (nutation, aberration, optional light-travel correction).

use crate::calendar::centuries_since_1900;
use crate::constants::{DEG2RAD, RAD2DEG, SUN_ABERRATION_DEG};
use crate::coordinates::EclipticPosition;
use crate::keplerlib::{eccentric_anomaly, true_anomaly};
use crate::mathutils::{frac360, polynome, reduce_deg};
use crate::Result;

/// Mean longitude of the Sun, arc-degrees.
/// `t` is Julian centuries since 1900 January 0.5.
pub fn mean_longitude(t: f64) -> f64 {
    reduce_deg(2.7969668e2 + 3.025e-4 * t * t + frac360(1.000021359e2 * t))
}

/// Mean anomaly of the Sun, arc-degrees.
pub fn mean_anomaly(t: f64) -> f64 {
    reduce_deg(3.5847583e2 - (1.5e-4 + 3.3e-6 * t) * t * t + frac360(9.999736042e1 * t))
}

/// True geocentric longitude (degrees) and radius-vector (AU) of the Sun.
///
/// `ms` and `ls` are the Sun's mean anomaly and mean longitude in degrees,
/// normally obtained from [`mean_anomaly`] and [`mean_longitude`] at the
/// same `t`.
pub fn true_geocentric(t: f64, ms: f64, ls: f64) -> Result<(f64, f64)> {
    let ma = ms * DEG2RAD;
    let s = polynome(t, &[1.675104e-2, -4.18e-5, -1.26e-7]); // eccentricity
    let ea = eccentric_anomaly(s, ma)?;
    let nu = true_anomaly(s, ea);
    let t2 = t * t;

    let calc_pert = |a: f64, b: f64| (a + frac360(b * t)) * DEG2RAD;
    let a = calc_pert(153.23, 6.255209472e1); // Venus
    let b = calc_pert(216.57, 1.251041894e2);
    let c = calc_pert(312.69, 9.156766028e1);
    let d = calc_pert(350.74 - 1.44e-3 * t2, 1.236853095e3); // Moon
    let h = calc_pert(353.4, 1.831353208e2);
    let e = (231.19 + 20.2 * t) * DEG2RAD; // inequality of long period

    // correction in orbital longitude
    let dl = 1.34e-3 * a.cos()
        + 1.54e-3 * b.cos()
        + 2e-3 * c.cos()
        + 1.79e-3 * d.sin()
        + 1.78e-3 * e.sin();
    // correction in radius-vector
    let dr = 5.43e-6 * a.sin()
        + 1.575e-5 * b.sin()
        + 1.627e-5 * c.sin()
        + 3.076e-5 * d.cos()
        + 9.27e-6 * h.sin();

    let lsn = reduce_deg(nu * RAD2DEG + ls - ms + dl);
    let rsn = 1.0000002 * (1.0 - s * ea.cos()) + dr;
    Ok((lsn, rsn))
}

/// Apparent geocentric position of the Sun.
///
/// `dpsi` is the nutation in longitude, degrees. When `ignore_light_travel`
/// is false the light-travel correction (about 1.4 seconds of time per AU)
/// is subtracted from the longitude as well.
pub fn apparent(jd: f64, dpsi: f64, ignore_light_travel: bool) -> Result<EclipticPosition> {
    let t = centuries_since_1900(jd);
    let ms = mean_anomaly(t);
    let ls = mean_longitude(t);
    let (mut lsn, rsn) = true_geocentric(t, ms, ls)?;
    lsn += dpsi; // correct for nutation
    lsn -= SUN_ABERRATION_DEG; // correct for aberration
    if !ignore_light_travel {
        let dt = 1.365 * rsn; // light-travel time, seconds
        lsn -= dt * 15.0 / 3600.0;
    }
    Ok(EclipticPosition::new(lsn, 0.0, rsn))
}
