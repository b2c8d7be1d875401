//! Satellite orbit state and the propagation-model dispatcher.
//!
//! An [`Orbit`] owns a parsed element set, the propagation model selected
//! for it (near-Earth or deep-space, chosen once from the recovered
//! orbital period), and the observable state of the most recent
//! propagation: ECI position and velocity, the derived geodetic
//! coordinates, and the Earth-shadow test.

use nalgebra::Vector3;
use uom::si::angle::radian;
use uom::si::f64::{Angle, Length};
use uom::si::length::{kilometer, meter};

use crate::consts::{EARTH_RADIUS_KM, MINUTES_PER_DAY, TWO_PI};
use crate::coord::geodetic_from_eci;
use crate::errors::{PredictError, PredictResult};
use crate::sdp4::{is_deep_space, DeepSpace};
use crate::sgp4::NearEarth;
use crate::sun;
use crate::tle::TwoLineElement;
use crate::time::JulianDate;

/// The propagation model family selected for an orbit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ephemeris {
    /// Near-Earth model (orbital period below 225 minutes)
    Sgp4,
    /// Deep-space model with lunisolar and resonance perturbations
    Sdp4,
}

/// The per-orbit model cache: one of the two concrete propagators.
#[derive(Clone, Debug)]
enum Model {
    NearEarth(NearEarth),
    DeepSpace(Box<DeepSpace>),
}

/// A satellite orbit: element set, propagation model, and the state of
/// the most recent propagation.
///
/// # Example
///
/// ```
/// use satpredict::Orbit;
///
/// let mut orbit = Orbit::from_tle(&[
///     "ISS (ZARYA)",
///     "1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992",
///     "2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008",
/// ])
/// .unwrap();
///
/// let epoch = orbit.elements().epoch();
/// orbit.propagate(epoch + 0.25).unwrap();
/// println!(
///     "altitude {} km, eclipsed: {}",
///     orbit.altitude().get::<uom::si::length::kilometer>(),
///     orbit.is_eclipsed()
/// );
/// ```
#[derive(Clone, Debug)]
pub struct Orbit {
    elements: TwoLineElement,
    ephemeris: Ephemeris,
    model: Model,

    // State of the most recent propagation
    time: JulianDate,
    position: Vector3<f64>,
    velocity: Vector3<f64>,
    latitude: f64,
    longitude: f64,
    altitude: f64,
    eclipsed: bool,
    eclipse_depth: f64,
    decayed: bool,
}

impl Orbit {
    /// Build an orbit from TLE lines (`[line1, line2]` or
    /// `[name, line1, line2]`).
    ///
    /// Chooses the propagation model from the recovered orbital period and
    /// runs its one-time initialization.
    ///
    /// # Errors
    ///
    /// Parsing errors from [`TwoLineElement::parse`].
    pub fn from_tle(lines: &[&str]) -> PredictResult<Self> {
        Ok(Self::from_elements(TwoLineElement::parse(lines)?))
    }

    /// Build an orbit from two data lines and an optional name.
    ///
    /// # Errors
    ///
    /// Parsing errors from [`TwoLineElement::parse_lines`].
    pub fn from_lines(name: Option<&str>, line1: &str, line2: &str) -> PredictResult<Self> {
        Ok(Self::from_elements(TwoLineElement::parse_lines(
            name, line1, line2,
        )?))
    }

    /// Build an orbit from an already-parsed element set.
    #[must_use]
    pub fn from_elements(elements: TwoLineElement) -> Self {
        let period = crate::sgp4::period_minutes(
            elements.mean_motion,
            elements.eccentricity,
            elements.inclination,
        );
        let (ephemeris, model) = if is_deep_space(period) {
            (
                Ephemeris::Sdp4,
                Model::DeepSpace(Box::new(DeepSpace::new(&elements))),
            )
        } else {
            (Ephemeris::Sgp4, Model::NearEarth(NearEarth::new(&elements)))
        };

        let time = elements.epoch;
        Self {
            elements,
            ephemeris,
            model,
            time,
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            latitude: 0.0,
            longitude: 0.0,
            altitude: 0.0,
            eclipsed: false,
            eclipse_depth: 0.0,
            decayed: false,
        }
    }

    /// Predict the orbit at `time`.
    ///
    /// On success every observable field (ECI state, geodetic triple,
    /// eclipse state) describes the same instant `time`. On failure the
    /// decayed flag is set where appropriate and the previous state is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// [`PredictError::Decayed`] when the semi-major axis falls below one
    /// Earth radius; [`PredictError::ConvergenceFailure`] if the Kepler
    /// solver fails on malformed elements.
    pub fn propagate(&mut self, time: JulianDate) -> PredictResult<()> {
        // The epoch-projection decay estimate latches up front: once a
        // propagation past the projected decay time has been requested the
        // orbit stays decayed.
        if self.projected_decay_before(time) {
            self.decayed = true;
        }

        let tsince = (time - self.elements.epoch) * MINUTES_PER_DAY;
        let state = match &mut self.model {
            Model::NearEarth(model) => model.position_velocity(tsince),
            Model::DeepSpace(model) => model.position_velocity(tsince),
        };
        let (position, velocity) = match state {
            Ok(state) => state,
            Err(error) => {
                if error == PredictError::Decayed {
                    self.decayed = true;
                }
                return Err(error);
            }
        };

        self.time = time;
        self.position = position;
        self.velocity = velocity;

        let geodetic = geodetic_from_eci(&position, time);
        self.latitude = geodetic.latitude;
        self.longitude = geodetic.longitude;
        self.altitude = geodetic.altitude;

        let sun = sun::position_eci(time);
        let (eclipsed, depth) = sun::shadow_depth(&position, &sun);
        self.eclipsed = eclipsed;
        self.eclipse_depth = depth;
        Ok(())
    }

    /// The parsed element set.
    #[must_use]
    pub fn elements(&self) -> &TwoLineElement {
        &self.elements
    }

    /// The propagation model selected at construction.
    #[must_use]
    pub fn ephemeris(&self) -> Ephemeris {
        self.ephemeris
    }

    /// Time of the most recent propagation.
    #[must_use]
    pub fn time(&self) -> JulianDate {
        self.time
    }

    /// ECI position in km at [`Orbit::time`].
    #[must_use]
    pub fn position(&self) -> &Vector3<f64> {
        &self.position
    }

    /// ECI velocity in km/s at [`Orbit::time`].
    #[must_use]
    pub fn velocity(&self) -> &Vector3<f64> {
        &self.velocity
    }

    /// Sub-satellite geodetic latitude.
    #[must_use]
    pub fn latitude(&self) -> Angle {
        Angle::new::<radian>(self.latitude)
    }

    /// Sub-satellite geodetic longitude, (−π, π].
    #[must_use]
    pub fn longitude(&self) -> Angle {
        Angle::new::<radian>(self.longitude)
    }

    /// Altitude above the WGS-84 ellipsoid.
    #[must_use]
    pub fn altitude(&self) -> Length {
        Length::new::<meter>(self.altitude)
    }

    /// Whether the satellite was inside the Earth's umbra at
    /// [`Orbit::time`].
    #[must_use]
    pub fn is_eclipsed(&self) -> bool {
        self.eclipsed
    }

    /// Shadow penetration angle: positive into the umbra, negative in the
    /// penumbra or daylight.
    #[must_use]
    pub fn eclipse_depth(&self) -> Angle {
        Angle::new::<radian>(self.eclipse_depth)
    }

    /// Whether the orbit is geostationary (mean motion within 0.0002
    /// rev/day of the sidereal rate).
    #[must_use]
    pub fn is_geostationary(&self) -> bool {
        (self.elements.mean_motion_revs - 1.0027).abs() < 0.0002
    }

    /// Whether the orbit has decayed.
    ///
    /// True once propagation has driven the semi-major axis below one
    /// Earth radius, or once the orbit has been propagated past the
    /// epoch-projected decay time implied by the mean-motion derivative.
    /// Monotone: once set it never clears.
    #[must_use]
    pub fn decayed(&self) -> bool {
        self.decayed || self.projected_decay_before(self.time)
    }

    fn projected_decay_before(&self, time: JulianDate) -> bool {
        let drag = self.elements.mean_motion_dot_revs;
        if drag.abs() < 1.0e-12 {
            return false;
        }
        let span = (16.666666 - self.elements.mean_motion_revs) / (10.0 * drag.abs());
        self.elements.epoch + span < time
    }

    /// Whether the satellite can ever rise above the horizon at the given
    /// observer latitude: the inclination cone plus the horizon angle at
    /// apogee must reach the latitude.
    #[must_use]
    pub fn aos_happens(&self, latitude: Angle) -> bool {
        let latitude = latitude.get::<radian>().abs();
        let mut inclination = self.elements.inclination;
        if inclination >= std::f64::consts::FRAC_PI_2 {
            inclination = std::f64::consts::PI - inclination;
        }
        let apogee = self.apogee().get::<kilometer>();
        (EARTH_RADIUS_KM / (apogee + EARTH_RADIUS_KM)).acos() + inclination > latitude
    }

    /// Apogee altitude above the mean equatorial radius.
    #[must_use]
    pub fn apogee(&self) -> Length {
        let sma = 331.25 * self.orbital_period().powf(2.0 / 3.0);
        Length::new::<kilometer>(sma * (1.0 + self.elements.eccentricity) - EARTH_RADIUS_KM)
    }

    /// Perigee altitude above the mean equatorial radius.
    #[must_use]
    pub fn perigee(&self) -> Length {
        let sma = 331.25 * self.orbital_period().powf(2.0 / 3.0);
        Length::new::<kilometer>(sma * (1.0 - self.elements.eccentricity) - EARTH_RADIUS_KM)
    }

    /// Orbital period in minutes, from the recovered mean motion.
    #[must_use]
    pub fn orbital_period(&self) -> f64 {
        let mean_motion = match &self.model {
            Model::NearEarth(model) => model.mean_motion(),
            Model::DeepSpace(model) => model.mean_motion(),
        };
        TWO_PI / mean_motion
    }
}
