//! Low-precision lunar ephemeris.
//!
//! Truncated ELP-style series in Julian centuries from J2000 for the
//! Moon's ecliptic longitude, latitude and distance, converted to an ECI
//! position. Accuracy is a few arcminutes, sufficient for look angles
//! from a ground station.

use nalgebra::Vector3;

use crate::consts::{DAYS_PER_CENTURY, J2000_JD};
use crate::coord::wrap_two_pi;
use crate::sun::obliquity;
use crate::time::{astronomical_julian, JulianDate};

/// ECI position of the Moon in km.
#[must_use]
pub fn position_eci(time: JulianDate) -> Vector3<f64> {
    let t = (astronomical_julian(time) - J2000_JD) / DAYS_PER_CENTURY;

    // Fundamental arguments (rad): mean longitude, lunar and solar mean
    // anomalies, argument of latitude, mean elongation from the Sun.
    let l0 = wrap_two_pi((218.31617 + 481267.88088 * t).to_radians());
    let l = wrap_two_pi((134.96292 + 477198.86753 * t).to_radians());
    let ls = wrap_two_pi((357.52543 + 35999.04944 * t).to_radians());
    let f = wrap_two_pi((93.27283 + 483202.01873 * t).to_radians());
    let d = wrap_two_pi((297.85027 + 445267.11135 * t).to_radians());

    // Longitude perturbations (arcsec)
    let dl = 22640.0 * l.sin() + 769.0 * (2.0 * l).sin()
        - 4586.0 * (l - 2.0 * d).sin()
        + 2370.0 * (2.0 * d).sin()
        - 668.0 * ls.sin()
        - 412.0 * (2.0 * f).sin()
        - 212.0 * (2.0 * l - 2.0 * d).sin()
        - 206.0 * (l + ls - 2.0 * d).sin()
        + 192.0 * (l + 2.0 * d).sin()
        - 165.0 * (ls - 2.0 * d).sin()
        + 148.0 * (l - ls).sin()
        - 125.0 * d.sin()
        - 110.0 * (l + ls).sin()
        - 55.0 * (2.0 * f - 2.0 * d).sin();
    let longitude = l0 + dl.to_radians() / 3600.0;

    // Latitude (arcsec): dominant term plus the flat-latitude corrections
    let s = f + (dl + 412.0 * (2.0 * f).sin() + 541.0 * ls.sin()).to_radians() / 3600.0;
    let h = f - 2.0 * d;
    let n = -526.0 * h.sin() + 44.0 * (l + h).sin() - 31.0 * (h - l).sin()
        - 23.0 * (ls + h).sin()
        + 11.0 * (h - ls).sin()
        - 25.0 * (f - 2.0 * l).sin()
        + 21.0 * (f - l).sin();
    let latitude = (18520.0 * s.sin() + n).to_radians() / 3600.0;

    // Distance (km), leading cosine terms
    let distance = 385000.56 - 20905.36 * l.cos()
        - 3699.11 * (2.0 * d - l).cos()
        - 2955.97 * (2.0 * d).cos()
        - 569.93 * (2.0 * l).cos()
        + 246.16 * (2.0 * d - 2.0 * l).cos();

    // Ecliptic → equatorial
    let eps = obliquity(t);
    let (sin_lat, cos_lat) = latitude.sin_cos();
    let (sin_lon, cos_lon) = longitude.sin_cos();
    let x = distance * cos_lat * cos_lon;
    let y = distance * cos_lat * sin_lon;
    let z = distance * sin_lat;
    Vector3::new(
        x,
        y * eps.cos() - z * eps.sin(),
        y * eps.sin() + z * eps.cos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_lunar() {
        for day in 0..60 {
            let r = position_eci(14800.0 + f64::from(day) * 0.93).norm();
            assert!(r > 356_000.0 && r < 407_000.0, "r = {}", r);
        }
    }

    #[test]
    fn declination_stays_within_inclination_band() {
        // Ecliptic obliquity plus the 5.1° lunar inclination.
        for day in 0..60 {
            let position = position_eci(14700.0 + f64::from(day) * 0.93);
            let declination = (position.z / position.norm()).asin();
            assert!(declination.abs() < f64::to_radians(29.0));
        }
    }

    #[test]
    fn sidereal_month_brings_the_moon_back() {
        let t0 = 14800.0;
        let a = position_eci(t0).normalize();
        let b = position_eci(t0 + 27.321662).normalize();
        let angle = a.dot(&b).clamp(-1.0, 1.0).acos();
        assert!(angle.to_degrees() < 8.0, "angle = {}", angle.to_degrees());
    }

    #[test]
    fn daily_motion_is_about_thirteen_degrees() {
        let a = position_eci(15100.0).normalize();
        let b = position_eci(15101.0).normalize();
        let angle = a.dot(&b).clamp(-1.0, 1.0).acos().to_degrees();
        assert!(angle > 10.0 && angle < 16.0, "angle = {}", angle);
    }
}
