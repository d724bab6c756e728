//! Osculating orbital elements of the planets
//!
//! Per-planet polynomial element tables referred to epoch 1900 January 0.5,
//! with the time argument in Julian centuries since that epoch. The linear
//! mean-longitude coefficient is in revolutions per century and is folded
//! through [`frac360`] to keep full precision over many revolutions; the
//! remaining polynomials are evaluated with the Horner scheme.
//!
//! The tables are built once into a process-wide registry and are read-only
//! afterward, so they can be shared freely between ephemeris contexts.

use std::collections::HashMap;

use lazy_static::lazy_static;

use super::Planet;
use crate::constants::DEG2RAD;
use crate::mathutils::{frac360, polynome, reduce_deg};

/// Static orbital element table for one planet
#[derive(Debug, Clone)]
pub struct OrbitalElements {
    /// Mean longitude, degrees; the linear term is revolutions per century
    pub mean_longitude: &'static [f64],
    /// Longitude of perihelion, degrees
    pub perihelion: &'static [f64],
    /// Eccentricity of the orbit
    pub eccentricity: &'static [f64],
    /// Inclination to the ecliptic, degrees
    pub inclination: &'static [f64],
    /// Longitude of the ascending node, degrees
    pub node: &'static [f64],
    /// Semi-major axis, AU
    pub semi_axis: f64,
    /// Mean daily motion, degrees per day
    pub daily_motion: f64,
}

/// Element set evaluated at a specific time
#[derive(Debug, Clone, Copy)]
pub struct ElementSnapshot {
    /// Mean anomaly, radians
    pub ma: f64,
    /// Eccentricity
    pub s: f64,
    /// Semi-major axis, AU
    pub sa: f64,
    /// Longitude of perihelion, degrees
    pub ph: f64,
    /// Longitude of the ascending node, radians
    pub nd: f64,
    /// Inclination, radians
    pub incl: f64,
}

impl OrbitalElements {
    /// Mean longitude at time `t`, degrees in [0, 360)
    pub fn mean_longitude_at(&self, t: f64) -> f64 {
        let ml = self.mean_longitude;
        let mut v = ml[0] + frac360(ml[1] * t);
        let mut tn = t * t;
        for &c in &ml[2..] {
            v += c * tn;
            tn *= t;
        }
        reduce_deg(v)
    }

    /// Longitude of perihelion at time `t`, degrees
    pub fn perihelion_at(&self, t: f64) -> f64 {
        polynome(t, self.perihelion)
    }

    /// Mean anomaly at time `t`, radians in [0, 2π)
    pub fn mean_anomaly_at(&self, t: f64) -> f64 {
        reduce_deg(self.mean_longitude_at(t) - self.perihelion_at(t)) * DEG2RAD
    }

    /// Eccentricity at time `t`
    pub fn eccentricity_at(&self, t: f64) -> f64 {
        polynome(t, self.eccentricity)
    }

    /// Full element snapshot at time `t`
    pub fn at(&self, t: f64) -> ElementSnapshot {
        ElementSnapshot {
            ma: self.mean_anomaly_at(t),
            s: self.eccentricity_at(t),
            sa: self.semi_axis,
            ph: self.perihelion_at(t),
            nd: reduce_deg(polynome(t, self.node)) * DEG2RAD,
            incl: polynome(t, self.inclination) * DEG2RAD,
        }
    }
}

lazy_static! {
    static ref REGISTRY: HashMap<Planet, OrbitalElements> = {
        let mut m = HashMap::new();
        m.insert(
            Planet::Mercury,
            OrbitalElements {
                mean_longitude: &[178.179078, 415.2057519, 3.011e-4],
                perihelion: &[75.899697, 1.5554889, 2.947e-4],
                eccentricity: &[2.0561421e-1, 2.046e-5, -3e-8],
                inclination: &[7.002881, 1.8608e-3, -1.83e-5],
                node: &[47.145944, 1.1852083, 1.739e-4],
                semi_axis: 3.870986e-1,
                daily_motion: 4.0923344,
            },
        );
        m.insert(
            Planet::Venus,
            OrbitalElements {
                mean_longitude: &[342.767053, 162.5533664, 3.097e-4],
                perihelion: &[130.163833, 1.4080361, 9.764e-4],
                eccentricity: &[6.82069e-3, -4.774e-5, 9.1e-8],
                inclination: &[3.393631, 1.0058e-3, -1e-6],
                node: &[75.779647, 8.9985e-1, 4.1e-4],
                semi_axis: 7.233316e-1,
                daily_motion: 1.6021302,
            },
        );
        m.insert(
            Planet::Mars,
            OrbitalElements {
                mean_longitude: &[293.737334, 53.17137642, 3.107e-4],
                perihelion: &[334.218203, 1.8407584, 1.299e-4, -1.19e-6],
                eccentricity: &[9.33129e-2, 9.2064e-5, -7.7e-8],
                inclination: &[1.850333, -6.75e-4, 1.26e-5],
                node: &[48.786442, 7.709917e-1, -1.4e-6, -5.33e-6],
                semi_axis: 1.5236883,
                daily_motion: 5.240330e-1,
            },
        );
        m.insert(
            Planet::Jupiter,
            OrbitalElements {
                mean_longitude: &[238.049257, 8.434172183, 3.347e-4, -1.65e-6],
                perihelion: &[12.720972, 1.6126424, 1.0161e-3, -1.095e-5],
                eccentricity: &[4.833475e-2, 1.6418e-4, -4.676e-7, -1.7e-9],
                inclination: &[1.308736, -5.6961e-3, 3.9e-6],
                node: &[99.443414, 1.01053, 3.5222e-4, -8.51e-6],
                semi_axis: 5.202561,
                daily_motion: 8.30912e-2,
            },
        );
        m.insert(
            Planet::Saturn,
            OrbitalElements {
                mean_longitude: &[266.564377, 3.398638567, 3.245e-4, -5.8e-6],
                perihelion: &[91.098214, 1.9584158, 8.2636e-4, 4.61e-6],
                eccentricity: &[5.589232e-2, -3.455e-4, -7.28e-7, 7.4e-10],
                inclination: &[2.492519, -3.9189e-3, -1.549e-5, 4e-8],
                node: &[112.790414, 8.731951e-1, -1.5218e-4, -5.31e-6],
                semi_axis: 9.554747,
                daily_motion: 3.34597e-2,
            },
        );
        m.insert(
            Planet::Uranus,
            OrbitalElements {
                mean_longitude: &[244.19747, 1.194065406, 3.16e-4, -6e-7],
                perihelion: &[171.548692, 1.4844328, 2.372e-4, -6.1e-7],
                eccentricity: &[4.63444e-2, -2.658e-5, 7.7e-8],
                inclination: &[7.72464e-1, 6.253e-4, 3.95e-5],
                node: &[73.477111, 4.986678e-1, 1.3117e-3],
                semi_axis: 19.21814,
                daily_motion: 1.17308e-2,
            },
        );
        m.insert(
            Planet::Neptune,
            OrbitalElements {
                mean_longitude: &[84.457994, 6.107942056e-1, 3.205e-4, -6e-7],
                perihelion: &[46.727364, 1.4245744, 3.9082e-4, -6.05e-7],
                eccentricity: &[8.99704e-3, 6.33e-6, -2e-9],
                inclination: &[1.779242, -9.5436e-3, -9.1e-6],
                node: &[130.681389, 1.098935, 2.4987e-4, -4.718e-6],
                semi_axis: 30.10957,
                daily_motion: 5.9810e-3,
            },
        );
        m.insert(
            Planet::Pluto,
            OrbitalElements {
                mean_longitude: &[95.3113544, 3.980332167e-1],
                perihelion: &[224.017],
                eccentricity: &[2.5515e-1],
                inclination: &[17.1329],
                node: &[110.191],
                semi_axis: 39.8151,
                daily_motion: 3.9794e-3,
            },
        );
        m
    };
}

/// Orbital element table for a planet, from the process-wide registry
pub fn elements(planet: Planet) -> &'static OrbitalElements {
    &REGISTRY[&planet]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_registry_covers_all_planets() {
        for planet in Planet::ALL {
            let oe = elements(planet);
            assert!(oe.semi_axis > 0.0);
            assert!(oe.daily_motion > 0.0);
        }
    }

    #[test]
    fn test_epoch_values() {
        // At t = 0 the polynomials collapse to their leading coefficients
        let mercury = elements(Planet::Mercury);
        assert_abs_diff_eq!(mercury.mean_longitude_at(0.0), 178.179078, epsilon = 1e-9);
        assert_abs_diff_eq!(mercury.eccentricity_at(0.0), 0.20561421, epsilon = 1e-9);
        assert_abs_diff_eq!(mercury.perihelion_at(0.0), 75.899697, epsilon = 1e-9);

        let neptune = elements(Planet::Neptune);
        assert_abs_diff_eq!(neptune.eccentricity_at(0.0), 0.00899704, epsilon = 1e-9);
    }

    #[test]
    fn test_mean_longitude_advances_one_revolution() {
        // Mercury makes 415.2057519 revolutions per century: a quarter of a
        // revolution past an integer count lands 90° further along.
        let mercury = elements(Planet::Mercury);
        let t = 1.0 / 415.2057519; // one Mercury year, in centuries
        let l0 = mercury.mean_longitude_at(0.0);
        let l1 = mercury.mean_longitude_at(t);
        // After exactly one revolution the secular terms contribute almost
        // nothing, so the longitude is back near its starting point.
        assert_abs_diff_eq!(l0, l1, epsilon = 0.05);
    }

    #[test]
    fn test_snapshot_ranges() {
        for planet in Planet::ALL {
            let snap = elements(planet).at(0.5);
            assert!((0.0..std::f64::consts::TAU).contains(&snap.ma));
            assert!((0.0..1.0).contains(&snap.s), "eccentricity for {planet:?}");
            assert!(snap.incl.abs() < 0.35, "inclination for {planet:?}");
        }
    }
}
