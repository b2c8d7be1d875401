//! Ground-station observation geometry.
//!
//! An [`Observer`] is a fixed geodetic position; an [`Observation`] is
//! the topocentric view of a satellite (or of the Sun or Moon) from that
//! position at one instant: azimuth, elevation and their rates, range and
//! range rate, and the Doppler shift they imply.

use nalgebra::Vector3;
use uom::si::angle::radian;
use uom::si::angular_velocity::radian_per_second;
use uom::si::f64::{Angle, AngularVelocity, Frequency, Length, Velocity};
use uom::si::frequency::hertz;
use uom::si::length::{kilometer, meter};
use uom::si::velocity::kilometer_per_second;

use crate::consts::{MFACTOR, SPEED_OF_LIGHT};
use crate::coord::{eci_from_geodetic, eci_to_topocentric, local_sidereal, wrap_two_pi};
use crate::moon;
use crate::orbit::Orbit;
use crate::sun;
use crate::time::JulianDate;

/// A ground station: name and WGS-84 geodetic position, immutable after
/// construction and freely shareable.
///
/// # Example
///
/// ```
/// use satpredict::Observer;
/// use uom::si::angle::degree;
/// use uom::si::f64::{Angle, Length};
/// use uom::si::length::meter;
///
/// let oslo = Observer::new(
///     "Oslo",
///     Angle::new::<degree>(59.95),
///     Angle::new::<degree>(10.75),
///     Length::new::<meter>(0.0),
/// );
/// assert_eq!(oslo.name(), "Oslo");
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observer {
    name: String,
    /// Geodetic latitude (rad)
    latitude: f64,
    /// Geodetic longitude (rad, east positive)
    longitude: f64,
    /// Altitude above the WGS-84 ellipsoid (m)
    altitude: f64,
}

impl Observer {
    /// Create an observation point.
    #[must_use]
    pub fn new(name: &str, latitude: Angle, longitude: Angle, altitude: Length) -> Self {
        Self {
            name: name.to_string(),
            latitude: latitude.get::<radian>(),
            longitude: longitude.get::<radian>(),
            altitude: altitude.get::<meter>(),
        }
    }

    /// Observer name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Geodetic latitude.
    #[must_use]
    pub fn latitude(&self) -> Angle {
        Angle::new::<radian>(self.latitude)
    }

    /// Geodetic longitude.
    #[must_use]
    pub fn longitude(&self) -> Angle {
        Angle::new::<radian>(self.longitude)
    }

    /// Altitude above the WGS-84 ellipsoid.
    #[must_use]
    pub fn altitude(&self) -> Length {
        Length::new::<meter>(self.altitude)
    }

    /// Observe a satellite from this station.
    ///
    /// Uses the orbit's cached state: propagate to the time of interest
    /// first.
    #[must_use]
    pub fn observe_orbit(&self, orbit: &Orbit) -> Observation {
        self.observe_eci(orbit.time(), orbit.position(), orbit.velocity())
    }

    /// Observe the Sun from this station.
    ///
    /// The solar position feeds the same topocentric pipeline as a
    /// satellite; rates reflect the diurnal motion of the station.
    #[must_use]
    pub fn observe_sun(&self, time: JulianDate) -> Observation {
        self.observe_eci(time, &sun::position_eci(time), &Vector3::zeros())
    }

    /// Observe the Moon from this station.
    #[must_use]
    pub fn observe_moon(&self, time: JulianDate) -> Observation {
        self.observe_eci(time, &moon::position_eci(time), &Vector3::zeros())
    }

    /// Doppler shift of a satellite downlink as seen from this station,
    /// positive while the satellite approaches.
    #[must_use]
    pub fn doppler_shift(&self, orbit: &Orbit, downlink: Frequency) -> Frequency {
        self.observe_orbit(orbit).doppler_shift(downlink)
    }

    /// Topocentric observation of an arbitrary ECI state.
    pub(crate) fn observe_eci(
        &self,
        time: JulianDate,
        position: &Vector3<f64>,
        velocity: &Vector3<f64>,
    ) -> Observation {
        let (site_position, site_velocity) =
            eci_from_geodetic(self.latitude, self.longitude, self.altitude, time);
        let range = position - site_position;
        let range_rate_vector = velocity - site_velocity;
        let distance = range.norm();

        let theta = local_sidereal(time, self.longitude);
        let top = eci_to_topocentric(&range, self.latitude, theta);

        // The SEZ basis rotates with the Earth; the topocentric velocity is
        // the rotated relative velocity plus the basis-rotation term.
        let (sin_lat, cos_lat) = self.latitude.sin_cos();
        let frame_rotation = Vector3::new(
            sin_lat * top.y,
            -(sin_lat * top.x + cos_lat * top.z),
            cos_lat * top.y,
        ) * MFACTOR;
        let top_rate = eci_to_topocentric(&range_rate_vector, self.latitude, theta)
            + frame_rotation;

        let azimuth = wrap_two_pi(top.y.atan2(-top.x));
        let elevation = (top.z / distance).asin();
        let range_rate = range.dot(&range_rate_vector) / distance;

        // Analytic rates from the SEZ-frame relative velocity
        let horizontal_sq = (top.x * top.x + top.y * top.y).max(1.0e-12);
        let azimuth_rate = (top.y * top_rate.x - top_rate.y * top.x) / horizontal_sq;
        let elevation_rate =
            (top_rate.z - (top.z / distance) * range_rate) / horizontal_sq.sqrt();

        Observation {
            time,
            azimuth,
            azimuth_rate,
            elevation,
            elevation_rate,
            range: distance,
            range_rate,
            range_south: top.x,
            range_east: top.y,
            range_zenith: top.z,
        }
    }
}

/// The topocentric view of one object from one station at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observation {
    pub(crate) time: JulianDate,
    pub(crate) azimuth: f64,
    pub(crate) azimuth_rate: f64,
    pub(crate) elevation: f64,
    pub(crate) elevation_rate: f64,
    pub(crate) range: f64,
    pub(crate) range_rate: f64,
    pub(crate) range_south: f64,
    pub(crate) range_east: f64,
    pub(crate) range_zenith: f64,
}

impl Observation {
    /// Time of the observation.
    #[must_use]
    pub fn time(&self) -> JulianDate {
        self.time
    }

    /// Azimuth, clockwise from north, [0, 2π).
    #[must_use]
    pub fn azimuth(&self) -> Angle {
        Angle::new::<radian>(self.azimuth)
    }

    /// Azimuth rate.
    #[must_use]
    pub fn azimuth_rate(&self) -> AngularVelocity {
        AngularVelocity::new::<radian_per_second>(self.azimuth_rate)
    }

    /// Elevation above the horizon, [−π/2, π/2].
    #[must_use]
    pub fn elevation(&self) -> Angle {
        Angle::new::<radian>(self.elevation)
    }

    /// Elevation rate.
    #[must_use]
    pub fn elevation_rate(&self) -> AngularVelocity {
        AngularVelocity::new::<radian_per_second>(self.elevation_rate)
    }

    /// Slant range.
    #[must_use]
    pub fn range(&self) -> Length {
        Length::new::<kilometer>(self.range)
    }

    /// Range rate, negative while approaching.
    #[must_use]
    pub fn range_rate(&self) -> Velocity {
        Velocity::new::<kilometer_per_second>(self.range_rate)
    }

    /// Range vector in the topocentric South-East-Zenith frame, km.
    #[must_use]
    pub fn range_vector(&self) -> Vector3<f64> {
        Vector3::new(self.range_south, self.range_east, self.range_zenith)
    }

    /// Doppler shift of a downlink at this range rate, positive while the
    /// object approaches.
    #[must_use]
    pub fn doppler_shift(&self, downlink: Frequency) -> Frequency {
        let shift =
            -downlink.get::<hertz>() * (self.range_rate * 1000.0) / SPEED_OF_LIGHT;
        Frequency::new::<hertz>(shift)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{EARTH_RADIUS_KM, TWO_PI};
    use crate::orbit::Orbit;
    use approx::assert_abs_diff_eq;
    use uom::si::angle::degree;

    fn oslo() -> Observer {
        Observer::new(
            "Oslo",
            Angle::new::<degree>(59.95),
            Angle::new::<degree>(10.75),
            Length::new::<meter>(0.0),
        )
    }

    #[test]
    fn observation_directly_overhead() {
        let observer = Observer::new(
            "equator",
            Angle::new::<degree>(0.0),
            Angle::new::<degree>(0.0),
            Length::new::<meter>(0.0),
        );
        let time = 14800.0;
        let (site, _) = eci_from_geodetic(0.0, 0.0, 0.0, time);
        let overhead = site * ((EARTH_RADIUS_KM + 400.0) / site.norm());
        let obs = observer.observe_eci(time, &overhead, &Vector3::zeros());
        assert_abs_diff_eq!(obs.elevation().get::<degree>(), 90.0, epsilon = 0.2);
        assert_abs_diff_eq!(obs.range().get::<kilometer>(), 400.0, epsilon = 1.0);
    }

    #[test]
    fn observation_on_the_northern_horizon() {
        let observer = Observer::new(
            "equator",
            Angle::new::<degree>(0.0),
            Angle::new::<degree>(0.0),
            Length::new::<meter>(0.0),
        );
        let time = 14800.0;
        // A point far along the Earth's axis sits due north, on the
        // horizon, for an equatorial observer.
        let north = Vector3::new(0.0, 0.0, 100_000.0);
        let obs = observer.observe_eci(time, &north, &Vector3::zeros());
        assert_abs_diff_eq!(obs.azimuth().get::<degree>(), 0.0, epsilon = 0.5);
        assert!(obs.elevation().get::<degree>().abs() < 4.0);
    }

    #[test]
    fn azimuth_is_always_in_range() {
        let observer = oslo();
        let mut orbit = Orbit::from_tle(&[
            "1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992",
            "2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008",
        ])
        .unwrap();
        let epoch = orbit.elements().epoch();
        for step in 0..100 {
            orbit.propagate(epoch + f64::from(step) * 0.013).unwrap();
            let obs = observer.observe_orbit(&orbit);
            let azimuth = obs.azimuth().get::<radian>();
            assert!((0.0..TWO_PI).contains(&azimuth));
            let elevation = obs.elevation().get::<radian>();
            assert!(elevation.abs() <= std::f64::consts::FRAC_PI_2);
        }
    }

    #[test]
    fn range_rate_matches_finite_difference() {
        let observer = oslo();
        let mut orbit = Orbit::from_tle(&[
            "1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992",
            "2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008",
        ])
        .unwrap();
        let epoch = orbit.elements().epoch();
        let dt_days = 1.0 / 86400.0;

        orbit.propagate(epoch + 0.07).unwrap();
        let a = observer.observe_orbit(&orbit);
        orbit.propagate(epoch + 0.07 + dt_days).unwrap();
        let b = observer.observe_orbit(&orbit);

        let numeric = b.range - a.range;
        assert_abs_diff_eq!(a.range_rate, numeric, epsilon = 0.05);
    }

    #[test]
    fn doppler_sign_follows_approach() {
        let base = oslo().observe_eci(14800.0, &Vector3::new(8000.0, 0.0, 0.0), &Vector3::zeros());
        // An approaching pass at -5 km/s on 145.8 MHz shifts up ~2.43 kHz.
        let observation = Observation {
            range_rate: -5.0,
            ..base
        };
        let shift = observation.doppler_shift(Frequency::new::<hertz>(145.8e6));
        assert_abs_diff_eq!(shift.get::<hertz>(), 2431.6, epsilon = 1.0);

        let receding = Observation {
            range_rate: 5.0,
            ..base
        };
        assert!(receding.doppler_shift(Frequency::new::<hertz>(145.8e6)).get::<hertz>() < 0.0);
    }

    #[test]
    fn sun_observation_is_plausible() {
        let observer = oslo();
        // Around local noon in mid-July the Sun stands high in the south.
        let midday = 14804.5 - 10.75 / 360.0;
        let obs = observer.observe_sun(midday);
        let elevation = obs.elevation().get::<degree>();
        assert!(elevation > 40.0 && elevation < 60.0, "el = {}", elevation);
        let azimuth = obs.azimuth().get::<degree>();
        assert!((90.0..270.0).contains(&azimuth), "az = {}", azimuth);
        // One astronomical unit, give or take the season.
        let range = obs.range().get::<kilometer>();
        assert!(range > 1.4e8 && range < 1.6e8);
    }

    #[test]
    fn moon_observation_range() {
        let observer = oslo();
        let obs = observer.observe_moon(14800.0);
        let range = obs.range().get::<kilometer>();
        assert!(range > 350_000.0 && range < 410_000.0);
        assert!(obs.elevation().get::<degree>().abs() <= 90.0);
    }

    #[test]
    fn sun_elevation_rate_changes_sign_across_noon() {
        let observer = oslo();
        let midday = 14804.5 - 10.75 / 360.0;
        let morning = observer.observe_sun(midday - 0.15);
        let evening = observer.observe_sun(midday + 0.15);
        assert!(morning.elevation_rate().get::<radian_per_second>() > 0.0);
        assert!(evening.elevation_rate().get::<radian_per_second>() < 0.0);
    }
}
