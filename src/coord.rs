//! Coordinate kernel: sidereal time, frame rotations, geodetic geometry.
//!
//! The propagators produce position and velocity in the true-equator-of-
//! epoch frame, treated as ECI throughout this crate. This module rotates
//! those vectors into the Earth-fixed frame, solves for WGS-84 geodetic
//! coordinates, and builds the topocentric (South-East-Zenith) quantities
//! observation geometry is expressed in.

use nalgebra::Vector3;

use crate::consts::{
    EARTH_RADIUS_KM, FLATTENING, J2000_JD, MFACTOR, OMEGA_E, SECONDS_PER_DAY, TWO_PI,
};
use crate::time::{astronomical_julian, JulianDate};

/// Reduce an angle into [0, 2π).
#[must_use]
pub(crate) fn wrap_two_pi(angle: f64) -> f64 {
    angle.rem_euclid(TWO_PI)
}

/// Reduce an angle into (−π, π].
#[must_use]
pub(crate) fn wrap_pi(angle: f64) -> f64 {
    let wrapped = wrap_two_pi(angle);
    if wrapped > std::f64::consts::PI {
        wrapped - TWO_PI
    } else {
        wrapped
    }
}

/// Greenwich Mean Sidereal Time in radians, [0, 2π).
///
/// 1992 Astronomical Almanac polynomial in Julian centuries since J2000,
/// evaluated at the preceding midnight and advanced by the elapsed UT.
#[must_use]
pub fn gmst(time: JulianDate) -> f64 {
    let jd = astronomical_julian(time);
    let ut = (jd + 0.5).fract();
    let midnight = jd - ut;
    let tu = (midnight - J2000_JD) / 36525.0;
    let seconds = 24110.54841 + tu * (8640184.812866 + tu * (0.093104 - tu * 6.2e-6));
    let seconds = (seconds + SECONDS_PER_DAY * OMEGA_E * ut).rem_euclid(SECONDS_PER_DAY);
    TWO_PI * seconds / SECONDS_PER_DAY
}

/// Local mean sidereal time of a longitude (rad east), [0, 2π).
#[must_use]
pub(crate) fn local_sidereal(time: JulianDate, longitude: f64) -> f64 {
    wrap_two_pi(gmst(time) + longitude)
}

/// Rotate an ECI vector into the Earth-fixed frame.
#[must_use]
pub fn eci_to_ecef(eci: &Vector3<f64>, time: JulianDate) -> Vector3<f64> {
    let (sin_theta, cos_theta) = gmst(time).sin_cos();
    Vector3::new(
        cos_theta * eci.x + sin_theta * eci.y,
        -sin_theta * eci.x + cos_theta * eci.y,
        eci.z,
    )
}

/// Rotate an Earth-fixed vector into the ECI frame.
#[must_use]
pub fn ecef_to_eci(ecef: &Vector3<f64>, time: JulianDate) -> Vector3<f64> {
    let (sin_theta, cos_theta) = gmst(time).sin_cos();
    Vector3::new(
        cos_theta * ecef.x - sin_theta * ecef.y,
        sin_theta * ecef.x + cos_theta * ecef.y,
        ecef.z,
    )
}

/// Geodetic coordinates derived from an ECI position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geodetic {
    /// Latitude (rad, north positive)
    pub latitude: f64,
    /// Longitude (rad, east positive, (−π, π])
    pub longitude: f64,
    /// Altitude above the WGS-84 ellipsoid (m)
    pub altitude: f64,
}

/// Solve for WGS-84 geodetic latitude, longitude and altitude from an ECI
/// position in km.
///
/// Iterative latitude solution (Astronomical Almanac page K12 form);
/// converges to 1e-10 rad in well under five iterations for any satellite
/// altitude.
#[must_use]
pub fn geodetic_from_eci(position: &Vector3<f64>, time: JulianDate) -> Geodetic {
    let theta = position.y.atan2(position.x);
    let longitude = wrap_pi(theta - gmst(time));

    let r = position.x.hypot(position.y);
    let e2 = FLATTENING * (2.0 - FLATTENING);
    let mut latitude = position.z.atan2(r);
    let mut c = 1.0;
    for _ in 0..10 {
        let previous = latitude;
        let sin_lat = previous.sin();
        c = 1.0 / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        latitude = (position.z + EARTH_RADIUS_KM * c * e2 * sin_lat).atan2(r);
        if (latitude - previous).abs() < 1e-10 {
            break;
        }
    }
    let altitude_km = r / latitude.cos() - EARTH_RADIUS_KM * c;

    Geodetic {
        latitude,
        longitude,
        altitude: altitude_km * 1000.0,
    }
}

/// ECI position (km) and velocity (km/s) of a point fixed to the rotating
/// Earth, given geodetic latitude/longitude (rad) and altitude (m).
#[must_use]
pub fn eci_from_geodetic(
    latitude: f64,
    longitude: f64,
    altitude: f64,
    time: JulianDate,
) -> (Vector3<f64>, Vector3<f64>) {
    let theta = local_sidereal(time, longitude);
    let (sin_lat, cos_lat) = latitude.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    let altitude_km = altitude / 1000.0;

    let c = 1.0 / (1.0 + FLATTENING * (FLATTENING - 2.0) * sin_lat * sin_lat).sqrt();
    let sq = (1.0 - FLATTENING) * (1.0 - FLATTENING) * c;
    let achcp = (EARTH_RADIUS_KM * c + altitude_km) * cos_lat;

    let position = Vector3::new(
        achcp * cos_theta,
        achcp * sin_theta,
        (EARTH_RADIUS_KM * sq + altitude_km) * sin_lat,
    );
    let velocity = Vector3::new(-MFACTOR * position.y, MFACTOR * position.x, 0.0);
    (position, velocity)
}

/// Rotate an ECI-frame vector into the topocentric South-East-Zenith frame
/// of an observer at geodetic latitude `latitude` whose local sidereal time
/// is `theta`.
#[must_use]
pub fn eci_to_topocentric(vector: &Vector3<f64>, latitude: f64, theta: f64) -> Vector3<f64> {
    let (sin_lat, cos_lat) = latitude.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    Vector3::new(
        sin_lat * cos_theta * vector.x + sin_lat * sin_theta * vector.y - cos_lat * vector.z,
        -sin_theta * vector.x + cos_theta * vector.y,
        cos_lat * cos_theta * vector.x + cos_lat * sin_theta * vector.y + sin_lat * vector.z,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn gmst_is_in_range_and_periodic() {
        for day in 0..400 {
            let t = f64::from(day) * 1.7;
            let g = gmst(t);
            assert!((0.0..TWO_PI).contains(&g));
        }
        // One sidereal day later the same angle comes back.
        let t0 = 14800.0;
        let sidereal_day = 1.0 / OMEGA_E;
        assert_abs_diff_eq!(gmst(t0), gmst(t0 + sidereal_day), epsilon = 1e-6);
    }

    #[test]
    fn gmst_increases_within_a_sidereal_day() {
        let t0 = 14800.2;
        let g0 = gmst(t0);
        let mut previous = 0.0;
        for step in 1..100 {
            // Stay inside one revolution by unwrapping relative to start.
            let g = wrap_two_pi(gmst(t0 + f64::from(step) * 0.009) - g0);
            assert!(g > previous);
            previous = g;
        }
    }

    #[test]
    fn ecef_round_trip() {
        let eci = Vector3::new(5102.5096, 6123.01152, 6378.1363);
        let t = 14850.3;
        let back = ecef_to_eci(&eci_to_ecef(&eci, t), t);
        assert_abs_diff_eq!((back - eci).norm(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn geodetic_round_trip() {
        let t = 14800.0;
        for &(lat_deg, lon_deg, alt_m) in &[
            (59.95, 10.75, 0.0),
            (-33.8, 151.2, 120.0),
            (0.0, 0.0, 400_000.0),
            (78.2, -15.6, 35.0),
        ] {
            let lat = f64::to_radians(lat_deg);
            let lon = f64::to_radians(lon_deg);
            let (position, _) = eci_from_geodetic(lat, lon, alt_m, t);
            let geo = geodetic_from_eci(&position, t);
            assert_abs_diff_eq!(geo.latitude, lat, epsilon = 1e-9);
            assert_abs_diff_eq!(geo.longitude, lon, epsilon = 1e-9);
            // 1e-3 m round-trip tolerance.
            assert_abs_diff_eq!(geo.altitude, alt_m, epsilon = 1e-3);
        }
    }

    #[test]
    fn equatorial_point_has_equatorial_radius() {
        let (position, velocity) = eci_from_geodetic(0.0, 0.0, 0.0, 0.0);
        assert_abs_diff_eq!(position.norm(), EARTH_RADIUS_KM, epsilon = 1e-9);
        // Surface rotation speed at the equator is ~0.465 km/s.
        assert_abs_diff_eq!(velocity.norm(), 0.4651, epsilon = 1e-3);
    }

    #[test]
    fn topocentric_zenith_axis_points_up() {
        // A vector straight up from the observer has only a Z component.
        let lat = f64::to_radians(45.0);
        let theta = f64::to_radians(30.0);
        let up = Vector3::new(
            lat.cos() * theta.cos(),
            lat.cos() * theta.sin(),
            lat.sin(),
        );
        let top = eci_to_topocentric(&up, lat, theta);
        assert_abs_diff_eq!(top.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(top.y, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(top.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn wrap_helpers() {
        assert_abs_diff_eq!(wrap_two_pi(-0.1), TWO_PI - 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(wrap_pi(TWO_PI - 0.1), -0.1, epsilon = 1e-12);
        assert!(wrap_two_pi(7.0) < TWO_PI);
    }
}
