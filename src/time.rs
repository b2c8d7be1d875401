//! Time representation and conversions.
//!
//! The canonical time type of this crate is [`JulianDate`]: the number of
//! days since 1979-12-31 00:00:00 UTC. Everything downstream, from
//! propagation to sidereal time to pass scheduling, is parameterized on
//! this scalar.
//! Conversions to and from calendar time go through `chrono`.

use chrono::{DateTime, TimeZone, Utc};

use crate::consts::SECONDS_PER_DAY;

/// Days since 1979-12-31 00:00:00 UTC.
pub type JulianDate = f64;

/// Astronomical Julian Date of the [`JulianDate`] zero point.
pub const JULIAN_EPOCH_OFFSET: f64 = 2444238.5;

/// Days between the Unix epoch and the [`JulianDate`] zero point.
const UNIX_EPOCH_DAYS: f64 = 3651.0;

/// Convert a Unix timestamp (seconds since 1970-01-01 UTC) to a [`JulianDate`].
#[must_use]
pub fn julian_from_timestamp(seconds: i64) -> JulianDate {
    seconds as f64 / SECONDS_PER_DAY - UNIX_EPOCH_DAYS
}

/// Convert a UTC time to a [`JulianDate`], keeping sub-second precision.
#[must_use]
pub fn julian_from_utc(utc: DateTime<Utc>) -> JulianDate {
    let seconds = utc.timestamp() as f64 + f64::from(utc.timestamp_subsec_nanos()) * 1e-9;
    seconds / SECONDS_PER_DAY - UNIX_EPOCH_DAYS
}

/// Convert a [`JulianDate`] back to a Unix timestamp, rounded to whole seconds.
#[must_use]
pub fn timestamp_from_julian(date: JulianDate) -> i64 {
    ((date + UNIX_EPOCH_DAYS) * SECONDS_PER_DAY).round() as i64
}

/// Convert a [`JulianDate`] back to UTC.
///
/// Returns `None` for dates outside the range `chrono` can represent.
#[must_use]
pub fn utc_from_julian(date: JulianDate) -> Option<DateTime<Utc>> {
    let seconds = (date + UNIX_EPOCH_DAYS) * SECONDS_PER_DAY;
    // Split on whole nanoseconds so times landing on an exact second do
    // not round across it.
    let total_nanos = (seconds * 1e9).round() as i64;
    let secs = total_nanos.div_euclid(1_000_000_000);
    let nanos = total_nanos.rem_euclid(1_000_000_000) as u32;
    Utc.timestamp_opt(secs, nanos).single()
}

/// Convert a [`JulianDate`] to an astronomical Julian Date.
#[must_use]
pub fn astronomical_julian(date: JulianDate) -> f64 {
    date + JULIAN_EPOCH_OFFSET
}

/// Astronomical Julian Date of 00:00 UT on December 31 of the preceding
/// year: "day 0.0" in the TLE epoch convention.
#[must_use]
pub fn julian_date_of_year(year: i32) -> f64 {
    let year = f64::from(year - 1);
    let a = (year / 100.0).trunc();
    let b = 2.0 - a + (a / 4.0).trunc();
    (365.25 * year).trunc() + (30.6001_f64 * 14.0).trunc() + 1720994.5 + b
}

/// Convert a TLE epoch (full year plus fractional day of year) to a
/// [`JulianDate`].
#[must_use]
pub fn julian_from_tle_epoch(year: i32, day_of_year: f64) -> JulianDate {
    julian_date_of_year(year) + day_of_year - JULIAN_EPOCH_OFFSET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_epoch_maps_to_known_offset() {
        // 1970-01-01 is 3651 days before 1979-12-31.
        assert_eq!(julian_from_timestamp(0), -3651.0);
        assert_eq!(timestamp_from_julian(-3651.0), 0);
    }

    #[test]
    fn zero_point_is_end_of_1979() {
        let utc = Utc.with_ymd_and_hms(1979, 12, 31, 0, 0, 0).unwrap();
        assert!((julian_from_utc(utc)).abs() < 1e-9);
    }

    #[test]
    fn utc_round_trip_is_exact_to_the_second() {
        let utc = Utc.with_ymd_and_hms(2020, 7, 12, 21, 15, 44).unwrap();
        let jd = julian_from_utc(utc);
        assert_eq!(utc_from_julian(jd).unwrap().timestamp(), utc.timestamp());
    }

    #[test]
    fn julian_date_of_year_matches_almanac() {
        // 00:00 UT, 1979-12-31 has JD 2444238.5; day 0.0 of 1980 is the same
        // instant.
        assert!((julian_date_of_year(1980) - 2444238.5).abs() < 1e-9);
        // Day 0.0 of 2020 is 2019-12-31 00:00 UT, JD 2458848.5.
        assert!((julian_date_of_year(2020) - 2458848.5).abs() < 1e-9);
    }

    #[test]
    fn tle_epoch_conversion() {
        // Epoch 20194.88612269: day 194.886 of 2020 → mid-July 2020.
        let jd = julian_from_tle_epoch(2020, 194.88612269);
        let utc = utc_from_julian(jd).unwrap();
        assert_eq!(utc.to_rfc3339().split('T').next().unwrap(), "2020-07-12");
    }
}
