//! Planetary position calculations
//!
//! Converts corrected osculating elements into heliocentric ecliptic
//! coordinates and from there into geocentric ones, with nutation and
//! aberration applied for apparent places. The per-planet element tables
//! live in [`elements`], the perturbation series in [`perturbations`].

pub mod elements;
pub mod perturbations;

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::constants::ABERRATION_RAD;
use crate::keplerlib::{eccentric_anomaly, true_anomaly};
use crate::mathutils::reduce_rad;
use crate::Result;
use self::elements::ElementSnapshot;
use self::perturbations::PertRecord;

/// The planets covered by the element and perturbation tables.
///
/// Earth is never a target (positions are geocentric); the Sun and Moon are
/// handled by their own modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Planet {
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Planet {
    /// All planets, in order of distance from the Sun
    pub const ALL: [Planet; 8] = [
        Planet::Mercury,
        Planet::Venus,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
        Planet::Pluto,
    ];

    /// The planet's name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Planet::Mercury => "Mercury",
            Planet::Venus => "Venus",
            Planet::Mars => "Mars",
            Planet::Jupiter => "Jupiter",
            Planet::Saturn => "Saturn",
            Planet::Uranus => "Uranus",
            Planet::Neptune => "Neptune",
            Planet::Pluto => "Pluto",
        }
    }

    /// Whether the planet orbits inside Earth's orbit.
    /// Inner and outer planets use different geocentric projections.
    pub fn is_inner(&self) -> bool {
        matches!(self, Planet::Mercury | Planet::Venus)
    }
}

/// Heliocentric quantities of a planet, ready for the geocentric projection
#[derive(Debug, Clone, Copy)]
pub struct HelioBundle {
    /// Angular separation from the Earth's heliocentric longitude, radians
    pub ll: f64,
    /// Radius-vector projected on the ecliptic, AU
    pub rpd: f64,
    /// Corrected orbital longitude, radians
    pub lpd: f64,
    /// Sine of the heliocentric latitude
    pub spsi: f64,
    /// Cosine of the heliocentric latitude
    pub cpsi: f64,
    /// Distance from Earth, AU
    pub rho: f64,
}

/// Heliocentric coordinates from a corrected element set.
///
/// `snap` is the element snapshot at the epoch, `ma` the (possibly
/// light-time shifted) mean anomaly in radians, `lg` the Earth's
/// heliocentric longitude in radians (Sun's geocentric longitude + π) and
/// `re` the Sun-Earth distance in AU.
pub fn heliocentric(
    snap: &ElementSnapshot,
    ma: f64,
    pert: &PertRecord,
    lg: f64,
    re: f64,
) -> Result<HelioBundle> {
    let s = snap.s + pert.ds;
    let m = ma + pert.dm;
    let ea = eccentric_anomaly(s, m)?;
    let nu = true_anomaly(s, ea);

    let rp = (snap.sa + pert.da) * (1.0 - s * s) / (1.0 + s * nu.cos()) + pert.dr;
    // Orbital longitude: true anomaly past perihelion, plus the part of the
    // mean-longitude correction not already absorbed by the mean anomaly.
    let lp = nu + snap.ph.to_radians() + (pert.dml - pert.dm);

    let k = lp - snap.nd;
    let psi = (k.sin() * snap.incl.sin()).asin() + pert.dhl;
    let lpd = reduce_rad((k.sin() * snap.incl.cos()).atan2(k.cos()) + snap.nd + pert.dl.to_radians());

    let spsi = psi.sin();
    let cpsi = psi.cos();
    let rpd = rp * cpsi;
    let ll = lpd - lg;
    // Law of cosines against the Sun-Earth distance
    let rho = (re * re + rp * rp - 2.0 * re * rp * cpsi * ll.cos()).sqrt();

    Ok(HelioBundle {
        ll,
        rpd,
        lpd,
        spsi,
        cpsi,
        rho,
    })
}

/// Geocentric ecliptic longitude and latitude, degrees.
///
/// `lg` and `re` are as in [`heliocentric`]. When `nutation` carries the
/// nutation in longitude (degrees) the apparent place is produced: the
/// longitude is shifted by nutation and both coordinates receive the
/// aberration correction for the Sun-elongation angle.
pub fn geocentric(
    planet: Planet,
    bundle: &HelioBundle,
    lg: f64,
    re: f64,
    nutation: Option<f64>,
) -> (f64, f64) {
    let sll = bundle.ll.sin();
    let cll = bundle.ll.cos();

    // Inner planets are projected from the Earth-Sun line, outer planets
    // from their own orbital longitude.
    let mut lam = if planet.is_inner() {
        (-bundle.rpd * sll).atan2(re - bundle.rpd * cll) + lg + PI
    } else {
        (re * sll).atan2(bundle.rpd - re * cll) + bundle.lpd
    };
    lam = reduce_rad(lam);
    let mut bet =
        (bundle.rpd * bundle.spsi * (lam - bundle.lpd).sin() / (bundle.cpsi * re * sll)).atan();

    if let Some(dpsi) = nutation {
        lam += dpsi.to_radians();
        // Elongation from the Sun's geocentric longitude (lg is the Earth's
        // heliocentric longitude, half a turn away).
        let a = lg - PI - lam;
        lam -= ABERRATION_RAD * a.cos() / bet.cos();
        bet -= ABERRATION_RAD * a.sin() * bet.sin();
        lam = reduce_rad(lam);
    }

    (lam.to_degrees(), bet.to_degrees())
}
