//! Low-precision solar ephemeris and the Earth-shadow test.
//!
//! A closed-form series in Julian centuries from J2000 gives the Sun's
//! ECI position to a few hundredths of a degree, which is ample for look
//! angles, Doppler-free observation geometry and eclipse detection.

use nalgebra::Vector3;

use crate::consts::{DAYS_PER_CENTURY, EARTH_RADIUS_KM, J2000_JD, SOLAR_RADIUS_KM};
use crate::coord::wrap_two_pi;
use crate::time::{astronomical_julian, JulianDate};

/// Mean obliquity of the ecliptic (rad) at `t` Julian centuries from J2000.
pub(crate) fn obliquity(t: f64) -> f64 {
    (23.43929111 - 0.013004 * t).to_radians()
}

/// ECI position of the Sun in km.
#[must_use]
pub fn position_eci(time: JulianDate) -> Vector3<f64> {
    let t = (astronomical_julian(time) - J2000_JD) / DAYS_PER_CENTURY;

    // Mean anomaly and ecliptic longitude of the Sun
    let m = wrap_two_pi((357.5256 + 35999.049 * t).to_radians());
    let longitude = wrap_two_pi(
        m + (282.9400f64).to_radians()
            + (6892.0 * m.sin() + 72.0 * (2.0 * m).sin()) / 3600.0 * std::f64::consts::PI / 180.0,
    );
    let distance = (149.619 - 2.499 * m.cos() - 0.021 * (2.0 * m).cos()) * 1.0e6;

    let eps = obliquity(t);
    let (sin_lon, cos_lon) = longitude.sin_cos();
    Vector3::new(
        distance * cos_lon,
        distance * sin_lon * eps.cos(),
        distance * sin_lon * eps.sin(),
    )
}

/// Umbra geometry test.
///
/// Compares the angular radii of Earth and Sun as seen from the satellite
/// with their angular separation. The returned depth is positive inside
/// the umbra and negative in the penumbra; the flag is set only for a
/// satellite fully inside the Earth's shadow cone.
#[must_use]
pub fn shadow_depth(satellite: &Vector3<f64>, sun: &Vector3<f64>) -> (bool, f64) {
    let sd_earth = (EARTH_RADIUS_KM / satellite.norm()).asin();
    let rho = sun - satellite;
    let sd_sun = (SOLAR_RADIUS_KM / rho.norm()).asin();
    let earthward = -satellite;
    let separation = (sun.dot(&earthward) / (sun.norm() * earthward.norm()))
        .clamp(-1.0, 1.0)
        .acos();
    let depth = sd_earth - sd_sun - separation;
    (sd_earth >= sd_sun && depth >= 0.0, depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::AU_KM;
    use approx::assert_abs_diff_eq;

    #[test]
    fn distance_is_about_one_astronomical_unit() {
        for t in [0.0, 5000.0, 10000.0, 15000.0] {
            let r = position_eci(t).norm();
            assert!(r > 0.975 * AU_KM && r < 1.025 * AU_KM);
        }
    }

    #[test]
    fn declination_stays_within_the_obliquity() {
        for day in 0..730 {
            let position = position_eci(14600.0 + f64::from(day) * 1.0);
            let declination = (position.z / position.norm()).asin();
            assert!(declination.abs() < f64::to_radians(23.5));
        }
    }

    #[test]
    fn june_solstice_sun_is_north() {
        // 2020-06-21 ≈ 14782 days after the 1979-12-31 zero point.
        let position = position_eci(14782.0);
        let declination = (position.z / position.norm()).asin();
        assert!(declination > f64::to_radians(23.0));
    }

    #[test]
    fn antisolar_low_orbit_is_in_umbra() {
        let time = 14800.0;
        let sun = position_eci(time);
        let satellite = -sun.normalize() * 6800.0;
        let (eclipsed, depth) = shadow_depth(&satellite, &sun);
        assert!(eclipsed);
        assert!(depth > 0.0);
    }

    #[test]
    fn sunward_orbit_is_in_daylight() {
        let time = 14800.0;
        let sun = position_eci(time);
        let satellite = sun.normalize() * 6800.0;
        let (eclipsed, depth) = shadow_depth(&satellite, &sun);
        assert!(!eclipsed);
        assert!(depth < 0.0);
    }

    #[test]
    fn shadow_boundary_depth_is_continuous() {
        let time = 15000.0;
        let sun = position_eci(time);
        let anti = -sun.normalize() * 7000.0;
        let (_, deep) = shadow_depth(&anti, &sun);
        // Slightly off-axis: shallower but still positive at LEO.
        let off_axis = (anti + Vector3::new(500.0, 0.0, 0.0)).normalize() * 7000.0;
        let (_, shallower) = shadow_depth(&off_axis, &sun);
        assert!(deep >= shallower);
    }

    #[test]
    fn sun_moves_prograde_along_the_ecliptic() {
        let a = position_eci(14800.0);
        let b = position_eci(14801.0);
        // About a degree per day of ecliptic longitude.
        let angle = (a.dot(&b) / (a.norm() * b.norm())).acos();
        assert_abs_diff_eq!(angle.to_degrees(), 0.985, epsilon = 0.05);
    }
}
