//! Per-epoch ephemeris context
//!
//! [`EphemerisContext`] ties the solver, element tables, perturbation series
//! and coordinate transforms together for one instant. Shared quantities
//! (solar position, nutation, obliquity) are owned by the context; per-body
//! results are memoized so that repeated queries return the identical value.
//!
//! Daily motion for everything except the Moon is a symmetric finite
//! difference between two sibling contexts half a day before and after the
//! epoch; the siblings are created on first use and owned by this context
//! alone.

use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;
use std::f64::consts::PI;

use log::{debug, trace};

use crate::calendar::centuries_since_1900;
use crate::constants::{DEG2RAD, LIGHT_DAYS_PER_AU};
use crate::coordinates::EclipticPosition;
use crate::mathutils::{diff_angle_deg, reduce_deg};
use crate::moonlib::{self, MoonPosition};
use crate::nutationlib::{self, Nutation};
use crate::planetlib::{self, elements::elements, Planet};
use crate::sunlib;
use crate::{OrreryError, Result};

/// A body that can be queried by name on an [`EphemerisContext`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Moon,
    /// Ascending lunar node
    LunarNode,
    Planet(Planet),
}

impl Body {
    /// Resolve a body from its name, case-insensitively.
    /// The node answers to "Node" and "Lunar Node".
    pub fn parse(name: &str) -> Result<Body> {
        let body = match name.to_ascii_lowercase().as_str() {
            "sun" => Body::Sun,
            "moon" => Body::Moon,
            "node" | "lunar node" | "lunarnode" => Body::LunarNode,
            "mercury" => Body::Planet(Planet::Mercury),
            "venus" => Body::Planet(Planet::Venus),
            "mars" => Body::Planet(Planet::Mars),
            "jupiter" => Body::Planet(Planet::Jupiter),
            "saturn" => Body::Planet(Planet::Saturn),
            "uranus" => Body::Planet(Planet::Uranus),
            "neptune" => Body::Planet(Planet::Neptune),
            "pluto" => Body::Planet(Planet::Pluto),
            _ => return Err(OrreryError::UnknownBody(name.to_string())),
        };
        Ok(body)
    }

    /// The body's name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::LunarNode => "Lunar Node",
            Body::Planet(p) => p.name(),
        }
    }
}

/// One geocentric pass of the planetary pipeline
struct GeoPass {
    lambda: f64,
    beta: f64,
    rho: f64,
}

/// Ephemeris facade for a single epoch.
///
/// Construction computes the time argument, the Sun's mean elements,
/// nutation and obliquity; everything else is computed on first query and
/// cached. A context is conceptually immutable after construction; the
/// caches are invisible to callers, and repeated queries are idempotent.
/// Contexts are independent values: computing several epochs from several
/// threads is fine, but a single context is not meant to be shared between
/// threads.
pub struct EphemerisContext {
    /// Epoch as Julian date
    jd: f64,
    /// Julian centuries since 1900 January 0.5
    t: f64,
    /// Apply nutation and aberration to positions
    apparent: bool,
    /// Report the true lunar node instead of the mean one
    true_node: bool,
    /// Sun's mean anomaly, degrees
    sun_mean_anomaly: f64,
    /// Sun's mean longitude, degrees
    sun_mean_longitude: f64,
    /// Nutation in longitude and obliquity, degrees
    nutation: Nutation,
    /// True obliquity of the ecliptic, degrees
    obliquity: f64,

    // Memoization caches, populated on first access
    sun_state: RefCell<Option<(f64, f64)>>,
    moon_state: OnceCell<MoonPosition>,
    positions: RefCell<HashMap<Body, EclipticPosition>>,
    motions: RefCell<HashMap<Body, f64>>,
    anomalies: RefCell<HashMap<Planet, f64>>,
    eccentricities: RefCell<HashMap<Planet, f64>>,

    // Sibling contexts at ±0.5 day, for finite-difference daily motion
    prev: OnceCell<Box<EphemerisContext>>,
    next: OnceCell<Box<EphemerisContext>>,
}

impl EphemerisContext {
    /// Create a context for the given Julian date.
    ///
    /// With `apparent` set, positions include nutation and aberration (and
    /// light-travel for the Sun). With `true_node` set, the lunar node is
    /// referred to the true equinox of date.
    pub fn new(jd: f64, apparent: bool, true_node: bool) -> Self {
        let t = centuries_since_1900(jd);
        let nutation = nutationlib::nutation(jd);
        let obliquity = nutationlib::true_obliquity(jd, &nutation);
        debug!("ephemeris context at jd={jd}, apparent={apparent}, true_node={true_node}");

        Self {
            jd,
            t,
            apparent,
            true_node,
            sun_mean_anomaly: sunlib::mean_anomaly(t),
            sun_mean_longitude: sunlib::mean_longitude(t),
            nutation,
            obliquity,
            sun_state: RefCell::new(None),
            moon_state: OnceCell::new(),
            positions: RefCell::new(HashMap::new()),
            motions: RefCell::new(HashMap::new()),
            anomalies: RefCell::new(HashMap::new()),
            eccentricities: RefCell::new(HashMap::new()),
            prev: OnceCell::new(),
            next: OnceCell::new(),
        }
    }

    /// Epoch of this context as Julian date
    pub fn julian_date(&self) -> f64 {
        self.jd
    }

    /// Julian centuries since 1900 January 0.5
    pub fn century_time(&self) -> f64 {
        self.t
    }

    /// Nutation at the epoch, degrees
    pub fn nutation(&self) -> Nutation {
        self.nutation
    }

    /// True obliquity of the ecliptic at the epoch, degrees
    pub fn obliquity(&self) -> f64 {
        self.obliquity
    }

    /// Geocentric ecliptic position of a body, by name.
    ///
    /// Fails with [`OrreryError::UnknownBody`] for unrecognized names.
    /// Repeated queries for the same body return the cached value.
    pub fn position(&self, name: &str) -> Result<EclipticPosition> {
        self.position_of(Body::parse(name)?)
    }

    /// Geocentric ecliptic position of a body
    pub fn position_of(&self, body: Body) -> Result<EclipticPosition> {
        if let Some(pos) = self.positions.borrow().get(&body) {
            return Ok(*pos);
        }
        trace!("computing position of {}", body.name());
        let pos = match body {
            Body::Sun => self.sun_position()?,
            Body::Moon => self.moon_position(),
            Body::LunarNode => {
                let node = moonlib::lunar_node(self.jd, !self.true_node);
                EclipticPosition::new(node, 0.0, 0.0)
            }
            Body::Planet(planet) => self.planet_position(planet)?,
        };
        self.positions.borrow_mut().insert(body, pos);
        Ok(pos)
    }

    /// Daily motion of a body in longitude, degrees per day.
    ///
    /// The Moon's motion comes out of the lunar series directly; for every
    /// other body it is the symmetric finite difference of the longitudes
    /// half a day before and after the epoch.
    pub fn daily_motion(&self, name: &str) -> Result<f64> {
        let body = Body::parse(name)?;
        if let Some(motion) = self.motions.borrow().get(&body) {
            return Ok(*motion);
        }
        let motion = match body {
            Body::Moon => self.moon_state().motion,
            _ => {
                let next = self.next().position_of(body)?;
                let prev = self.prev().position_of(body)?;
                diff_angle_deg(prev.lambda, next.lambda)
            }
        };
        self.motions.borrow_mut().insert(body, motion);
        Ok(motion)
    }

    /// Mean anomaly of a planet at this epoch, radians. Cached per planet.
    pub fn mean_anomaly(&self, planet: Planet) -> f64 {
        if let Some(ma) = self.anomalies.borrow().get(&planet) {
            return *ma;
        }
        let ma = elements(planet).mean_anomaly_at(self.t);
        self.anomalies.borrow_mut().insert(planet, ma);
        ma
    }

    /// Eccentricity of a planet's orbit at this epoch. Cached per planet,
    /// in its own key space.
    pub fn eccentricity(&self, planet: Planet) -> f64 {
        if let Some(s) = self.eccentricities.borrow().get(&planet) {
            return *s;
        }
        let s = elements(planet).eccentricity_at(self.t);
        self.eccentricities.borrow_mut().insert(planet, s);
        s
    }

    /// Sun's true geocentric longitude (degrees) and distance (AU)
    fn sun_geocentric(&self) -> Result<(f64, f64)> {
        if let Some(state) = *self.sun_state.borrow() {
            return Ok(state);
        }
        let state =
            sunlib::true_geocentric(self.t, self.sun_mean_anomaly, self.sun_mean_longitude)?;
        *self.sun_state.borrow_mut() = Some(state);
        Ok(state)
    }

    fn sun_position(&self) -> Result<EclipticPosition> {
        if self.apparent {
            sunlib::apparent(self.jd, self.nutation.dpsi, false)
        } else {
            let (lsn, rsn) = self.sun_geocentric()?;
            Ok(EclipticPosition::new(lsn, 0.0, rsn))
        }
    }

    fn moon_state(&self) -> &MoonPosition {
        self.moon_state
            .get_or_init(|| moonlib::true_position(self.jd))
    }

    fn moon_position(&self) -> EclipticPosition {
        let moon = self.moon_state();
        let mut pos = moon.position;
        if self.apparent {
            pos.lambda = reduce_deg(pos.lambda + self.nutation.dpsi);
        }
        pos
    }

    /// Two-pass planetary pipeline with first-order light-time correction:
    /// the second pass reruns the transform with the mean anomaly pulled
    /// back by the light-travel time, and the distance is kept from the
    /// first (geometric) pass.
    fn planet_position(&self, planet: Planet) -> Result<EclipticPosition> {
        let oe = elements(planet);
        let snap = oe.at(self.t);
        let (lsn, rsn) = self.sun_geocentric()?;
        let lg = lsn * DEG2RAD + PI;

        let ma0 = self.mean_anomaly(planet);
        let first = self.geocentric_pass(planet, &snap, ma0, lg, rsn)?;

        let light_days = first.rho * LIGHT_DAYS_PER_AU;
        let ma1 = ma0 - light_days * oe.daily_motion * DEG2RAD;
        let second = self.geocentric_pass(planet, &snap, ma1, lg, rsn)?;

        Ok(EclipticPosition::new(second.lambda, second.beta, first.rho))
    }

    fn geocentric_pass(
        &self,
        planet: Planet,
        snap: &planetlib::elements::ElementSnapshot,
        ma: f64,
        lg: f64,
        rsn: f64,
    ) -> Result<GeoPass> {
        let args = self.pert_args(planet, ma);
        let pert = planet.perturbations(&args);
        let helio = planetlib::heliocentric(snap, ma, &pert, lg, rsn)?;
        let nutation = self.apparent.then_some(self.nutation.dpsi);
        let (lambda, beta) = planetlib::geocentric(planet, &helio, lg, rsn, nutation);
        Ok(GeoPass {
            lambda,
            beta,
            rho: helio.rho,
        })
    }

    /// Assemble the perturbation argument vector for a planet, with the
    /// planet's own mean anomaly taken from `ma` (it shifts between the two
    /// light-time passes).
    fn pert_args(&self, planet: Planet, ma: f64) -> Vec<f64> {
        let ms = self.sun_mean_anomaly * DEG2RAD;
        match planet {
            Planet::Mercury => vec![
                ma,
                self.mean_anomaly(Planet::Venus),
                self.mean_anomaly(Planet::Jupiter),
            ],
            Planet::Venus => vec![self.t, ms, ma, self.mean_anomaly(Planet::Jupiter)],
            Planet::Mars => vec![
                ms,
                self.mean_anomaly(Planet::Venus),
                ma,
                self.mean_anomaly(Planet::Jupiter),
            ],
            Planet::Jupiter | Planet::Saturn | Planet::Uranus | Planet::Neptune => {
                vec![self.t, self.eccentricity(planet)]
            }
            Planet::Pluto => Vec::new(),
        }
    }

    fn prev(&self) -> &EphemerisContext {
        self.prev
            .get_or_init(|| Box::new(Self::new(self.jd - 0.5, self.apparent, self.true_node)))
    }

    fn next(&self) -> &EphemerisContext {
        self.next
            .get_or_init(|| Box::new(Self::new(self.jd + 0.5, self.apparent, self.true_node)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::J1900;
    use approx::assert_abs_diff_eq;

    // 1965 February 1, 11:46 UT
    const JD: f64 = 2438792.99027777778;

    #[test]
    fn test_unknown_body() {
        let ctx = EphemerisContext::new(JD, false, false);
        assert!(matches!(
            ctx.position("Vulcan"),
            Err(OrreryError::UnknownBody(_))
        ));
    }

    #[test]
    fn test_body_parsing_is_case_insensitive() {
        assert_eq!(Body::parse("mars").unwrap(), Body::Planet(Planet::Mars));
        assert_eq!(Body::parse("MOON").unwrap(), Body::Moon);
        assert_eq!(Body::parse("Lunar Node").unwrap(), Body::LunarNode);
    }

    #[test]
    fn test_positions_are_idempotent() {
        let ctx = EphemerisContext::new(JD, true, false);
        for name in [
            "Sun", "Moon", "Node", "Mercury", "Venus", "Mars", "Jupiter", "Saturn", "Uranus",
            "Neptune", "Pluto",
        ] {
            let a = ctx.position(name).unwrap();
            let b = ctx.position(name).unwrap();
            // Bit-identical, not merely close
            assert_eq!(a, b, "repeated query for {name}");
        }
    }

    #[test]
    fn test_longitudes_are_normalized() {
        for k in 0..8 {
            let ctx = EphemerisContext::new(J1900 + k as f64 * 4321.0, true, false);
            for name in ["Sun", "Moon", "Mercury", "Mars", "Saturn", "Pluto"] {
                let pos = ctx.position(name).unwrap();
                assert!(
                    (0.0..360.0).contains(&pos.lambda),
                    "{name} longitude {} at context {k}",
                    pos.lambda
                );
            }
        }
    }

    #[test]
    fn test_sun_position_matches_sunlib() {
        let djd = 30916.5; // 1984 August 24
        let ctx = EphemerisContext::new(djd + J1900, false, false);
        let sun = ctx.position("Sun").unwrap();
        assert_abs_diff_eq!(sun.lambda, 151.0131, epsilon = 1e-4);
        assert_abs_diff_eq!(sun.delta, 1.010994, epsilon = 1e-4);
        assert_abs_diff_eq!(sun.beta, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lunar_node_mean_and_true() {
        let mean_ctx = EphemerisContext::new(JD, false, false);
        assert_abs_diff_eq!(
            mean_ctx.position("Node").unwrap().lambda,
            80.31173,
            epsilon = 1e-4
        );
        let true_ctx = EphemerisContext::new(JD, false, true);
        assert_abs_diff_eq!(
            true_ctx.position("Node").unwrap().lambda,
            81.86653,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_moon_motion_comes_from_series() {
        let djd = -1.000050e+04;
        let ctx = EphemerisContext::new(djd + J1900, false, false);
        assert_abs_diff_eq!(
            ctx.daily_motion("Moon").unwrap(),
            14.073505,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_sun_daily_motion() {
        // The Sun moves just under a degree per day along the ecliptic
        let ctx = EphemerisContext::new(JD, false, false);
        let motion = ctx.daily_motion("Sun").unwrap();
        assert!((0.95..1.03).contains(&motion), "sun motion {motion}");
    }

    #[test]
    fn test_mean_node_regresses() {
        // The mean lunar node moves backward about 0.053 degrees per day
        let ctx = EphemerisContext::new(JD, false, false);
        let motion = ctx.daily_motion("Node").unwrap();
        assert_abs_diff_eq!(motion, -0.0529, epsilon = 5e-3);
    }

    #[test]
    fn test_planet_motion_magnitudes() {
        // Geocentric daily motion is bounded by the synodic extremes
        let bounds = [
            ("Mercury", 2.3),
            ("Venus", 1.3),
            ("Mars", 0.9),
            ("Jupiter", 0.3),
            ("Saturn", 0.2),
        ];
        let ctx = EphemerisContext::new(JD, false, false);
        for (name, bound) in bounds {
            let motion = ctx.daily_motion(name).unwrap();
            assert!(motion.abs() < bound, "{name} motion {motion}");
        }
    }

    #[test]
    fn test_eccentricity_cache_is_separate() {
        let ctx = EphemerisContext::new(JD, false, false);
        let ma = ctx.mean_anomaly(Planet::Jupiter);
        let s = ctx.eccentricity(Planet::Jupiter);
        // A mean anomaly is an angle in [0, 2π); an eccentricity is tiny.
        assert!((0.0..std::f64::consts::TAU).contains(&ma));
        assert!((0.0..0.3).contains(&s));
        assert_eq!(ctx.eccentricity(Planet::Jupiter), s);
    }

    #[test]
    fn test_planet_distances_are_plausible() {
        let ctx = EphemerisContext::new(JD, false, false);
        let mercury = ctx.position("Mercury").unwrap();
        assert!((0.5..1.5).contains(&mercury.delta), "{}", mercury.delta);
        let jupiter = ctx.position("Jupiter").unwrap();
        assert!((3.9..6.5).contains(&jupiter.delta), "{}", jupiter.delta);
        let pluto = ctx.position("Pluto").unwrap();
        assert!((28.0..51.0).contains(&pluto.delta), "{}", pluto.delta);
    }
}
