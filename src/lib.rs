//! Satellite orbit prediction and ground-station observation geometry.
//!
//! This crate parses NORAD two-line element sets, propagates satellite
//! orbits with the SGP4 (near-Earth) and SDP4 (deep-space) models,
//! converts the result to geodetic coordinates and topocentric look
//! angles, schedules passes (AOS/LOS) over a ground station, and models
//! solar/lunar positions, Earth eclipse and atmospheric refraction:
//!
//! - [`TwoLineElement`]: checksum-validated TLE parsing
//! - [`Orbit`]: propagation model selection, prediction and orbit
//!   predicates
//! - [`Observer`] / [`Observation`]: look angles, range, range rate and
//!   Doppler shift
//! - [`next_aos`] / [`next_los`]: horizon-crossing searches
//! - [`refraction`]: Saemundsson/Bennett atmospheric corrections
//!
//! # Time
//!
//! Every prediction is parameterized on [`JulianDate`]: days since
//! 1979-12-31 00:00:00 UTC. Use [`julian_from_utc`] / [`utc_from_julian`]
//! to convert at the boundary.
//!
//! # Example
//!
//! ```
//! use satpredict::{next_aos, Observer, Orbit};
//! use uom::si::angle::degree;
//! use uom::si::f64::{Angle, Length};
//! use uom::si::length::meter;
//!
//! let mut orbit = Orbit::from_tle(&[
//!     "ISS (ZARYA)",
//!     "1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992",
//!     "2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008",
//! ])?;
//! let station = Observer::new(
//!     "Oslo",
//!     Angle::new::<degree>(59.95),
//!     Angle::new::<degree>(10.75),
//!     Length::new::<meter>(0.0),
//! );
//!
//! let epoch = orbit.elements().epoch();
//! let rise = next_aos(&station, &mut orbit, epoch)?;
//! orbit.propagate(rise)?;
//! let observation = station.observe_orbit(&orbit);
//! println!(
//!     "AOS at azimuth {:.1}°",
//!     observation.azimuth().get::<degree>()
//! );
//! # Ok::<(), satpredict::PredictError>(())
//! ```
//!
//! # Accuracy
//!
//! The propagators implement the classic Hoots-Roehrich models against
//! WGS-72 gravity harmonics and WGS-84 Earth geometry, giving the
//! kilometre-level position accuracy near the element-set epoch that
//! published TLEs support. The solar and lunar ephemerides are
//! low-precision closed forms (arcminute-level), intended for look
//! angles and eclipse detection rather than astrometry.
//!
//! # Limitations
//!
//! - Atmospheric drag is modelled only through the TLE's B* term
//! - UTC is treated as UT1 (no IERS corrections)
//! - No relativistic corrections

mod consts;
mod coord;
mod errors;
mod moon;
mod observer;
mod orbit;
mod pass;
mod refraction;
mod sdp4;
mod sgp4;
mod sun;
mod time;
mod tle;

pub use coord::{ecef_to_eci, eci_to_ecef, geodetic_from_eci, gmst, Geodetic};
pub use errors::{PredictError, PredictResult};
pub use observer::{Observation, Observer};
pub use orbit::{Ephemeris, Orbit};
pub use pass::{next_aos, next_los};
pub use refraction::{
    apparent_elevation, apparent_elevation_ext, apparent_elevation_rate,
    apparent_elevation_rate_ext, refraction, refraction_ext, refraction_from_apparent,
    refraction_from_apparent_ext, refraction_rate, refraction_rate_ext,
};
pub use time::{
    julian_from_timestamp, julian_from_utc, timestamp_from_julian, utc_from_julian, JulianDate,
};
pub use tle::TwoLineElement;

pub mod solar {
    //! Solar and lunar ECI positions and the Earth-shadow test.
    pub use crate::moon::position_eci as moon_position_eci;
    pub use crate::sun::position_eci as sun_position_eci;
    pub use crate::sun::shadow_depth;
}
