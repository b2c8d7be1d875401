//! Two-Line Element (TLE) set parsing and validation.
//!
//! TLE sets are NORAD's standard encoding of satellite orbital elements at
//! an epoch. Parsing validates the modulo-10 checksum of both lines and
//! converts every field from TLE conventions (degrees, revolutions per day,
//! implicit decimal points) to the internal units the propagation models
//! work in (radians, radians per minute).
//!
//! # Example TLE
//!
//! ```text
//! ISS (ZARYA)
//! 1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992
//! 2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008
//! ```

use uom::si::angle::radian;
use uom::si::f64::Angle;

use crate::consts::{MINUTES_PER_DAY, TWO_PI};
use crate::errors::{PredictError, PredictResult};
use crate::time::{julian_from_tle_epoch, JulianDate};

/// Maximum length of the free-form name line.
const NAME_MAX: usize = 128;

/// A parsed, unit-converted two-line element set.
///
/// Angles are stored in radians and the mean motion in radians per minute
/// (the propagators' native units); the TLE-convention mean motion in
/// revolutions per day is retained for the coarse orbit-geometry formulas
/// (apogee, perigee, decay projection).
///
/// # Example
///
/// ```
/// use satpredict::TwoLineElement;
///
/// let tle = TwoLineElement::parse(&[
///     "ISS (ZARYA)",
///     "1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992",
///     "2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008",
/// ])
/// .unwrap();
///
/// assert_eq!(tle.catalog_number(), 25544);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TwoLineElement {
    /// Satellite name from the optional leading line
    pub(crate) name: String,
    /// Original first data line, verbatim
    pub(crate) line1: String,
    /// Original second data line, verbatim
    pub(crate) line2: String,

    /// Satellite catalog number
    pub(crate) catalog_number: u32,
    /// International designator (launch year, launch number, piece)
    pub(crate) designator: String,
    /// Ephemeris type column
    pub(crate) ephemeris_type: u8,
    /// Element set number
    pub(crate) element_set: u32,
    /// Revolution number at epoch
    pub(crate) revolution_number: u32,

    /// Epoch year (four digits)
    pub(crate) epoch_year: i32,
    /// Epoch day of year with fraction
    pub(crate) epoch_day: f64,
    /// Epoch as a [`JulianDate`]
    pub(crate) epoch: JulianDate,

    /// Half the first derivative of mean motion (rad/min²)
    pub(crate) mean_motion_dot: f64,
    /// One sixth of the second derivative of mean motion (rad/min³)
    pub(crate) mean_motion_ddot: f64,
    /// B* drag term (1/Earth radii)
    pub(crate) bstar: f64,
    /// Inclination (rad)
    pub(crate) inclination: f64,
    /// Right ascension of the ascending node (rad)
    pub(crate) right_ascension: f64,
    /// Eccentricity
    pub(crate) eccentricity: f64,
    /// Argument of perigee (rad)
    pub(crate) argument_of_perigee: f64,
    /// Mean anomaly (rad)
    pub(crate) mean_anomaly: f64,
    /// Mean motion (rad/min)
    pub(crate) mean_motion: f64,

    /// Mean motion as printed in the TLE (rev/day)
    pub(crate) mean_motion_revs: f64,
    /// Half mean-motion derivative as printed (rev/day²)
    pub(crate) mean_motion_dot_revs: f64,
}

impl TwoLineElement {
    /// Parse a TLE from a slice of lines.
    ///
    /// Accepts either `[line1, line2]` or `[name, line1, line2]`. The name
    /// is free-form and truncated to 128 characters.
    ///
    /// # Errors
    ///
    /// [`PredictError::InvalidChecksum`] if the modulo-10 checksum of
    /// either data line does not match its trailing digit;
    /// [`PredictError::InvalidFormat`] if a required field cannot be
    /// parsed.
    pub fn parse(lines: &[&str]) -> PredictResult<Self> {
        match lines {
            [line1, line2] => Self::parse_lines(None, line1, line2),
            [name, line1, line2] => Self::parse_lines(Some(name), line1, line2),
            _ => Err(PredictError::InvalidFormat {
                field: format!("expected 2 or 3 lines, got {}", lines.len()),
            }),
        }
    }

    /// Parse a TLE from its two data lines and an optional name.
    ///
    /// # Errors
    ///
    /// Same as [`TwoLineElement::parse`].
    pub fn parse_lines(name: Option<&str>, line1: &str, line2: &str) -> PredictResult<Self> {
        let line1 = line1.trim_end();
        let line2 = line2.trim_end();

        verify_line(line1, 1)?;
        verify_line(line2, 2)?;

        let name: String = name
            .map(|n| n.trim().chars().take(NAME_MAX).collect())
            .unwrap_or_default();

        let catalog_number = parse_field::<u32>(line1, 2..7, "catalog number")?;
        let designator = line1[9..17].trim().to_string();

        let epoch_year = parse_field::<i32>(line1, 18..20, "epoch year")?;
        let epoch_year = if epoch_year < 57 {
            2000 + epoch_year
        } else {
            1900 + epoch_year
        };
        let epoch_day = parse_field::<f64>(line1, 20..32, "epoch day")?;

        let mean_motion_dot_revs = parse_field::<f64>(line1, 33..43, "mean motion derivative")?;
        let mean_motion_ddot_revs = parse_exponent_field(line1, 44, "second derivative")?;
        let bstar = parse_exponent_field(line1, 53, "drag term")?;
        let ephemeris_type = line1[62..63].trim().parse::<u8>().unwrap_or(0);
        let element_set = parse_field::<u32>(line1, 64..68, "element set number")?;

        let inclination_deg = parse_field::<f64>(line2, 8..16, "inclination")?;
        let right_ascension_deg = parse_field::<f64>(line2, 17..25, "right ascension")?;
        let eccentricity = format!("0.{}", &line2[26..33])
            .parse::<f64>()
            .map_err(|_| PredictError::InvalidFormat {
                field: "eccentricity".into(),
            })?;
        let argument_of_perigee_deg = parse_field::<f64>(line2, 34..42, "argument of perigee")?;
        let mean_anomaly_deg = parse_field::<f64>(line2, 43..51, "mean anomaly")?;
        let mean_motion_revs = parse_field::<f64>(line2, 52..63, "mean motion")?;
        let revolution_number = parse_field::<u32>(line2, 63..68, "revolution number")?;

        if mean_motion_revs <= 0.0 {
            return Err(PredictError::InvalidFormat {
                field: "mean motion must be positive".into(),
            });
        }
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(PredictError::InvalidFormat {
                field: "eccentricity must be in [0, 1)".into(),
            });
        }

        // rev/day → rad/min; the derivatives pick up one factor of
        // 1/minutes-per-day per time order.
        let revs_to_rad_min = TWO_PI / MINUTES_PER_DAY;

        Ok(Self {
            name,
            line1: line1.to_string(),
            line2: line2.to_string(),
            catalog_number,
            designator,
            ephemeris_type,
            element_set,
            revolution_number,
            epoch_year,
            epoch_day,
            epoch: julian_from_tle_epoch(epoch_year, epoch_day),
            mean_motion_dot: mean_motion_dot_revs * revs_to_rad_min / MINUTES_PER_DAY,
            mean_motion_ddot: mean_motion_ddot_revs * revs_to_rad_min
                / MINUTES_PER_DAY
                / MINUTES_PER_DAY,
            bstar,
            inclination: inclination_deg.to_radians(),
            right_ascension: right_ascension_deg.to_radians(),
            eccentricity,
            argument_of_perigee: argument_of_perigee_deg.to_radians(),
            mean_anomaly: mean_anomaly_deg.to_radians(),
            mean_motion: mean_motion_revs * revs_to_rad_min,
            mean_motion_revs,
            mean_motion_dot_revs,
        })
    }

    /// Satellite name, empty if the TLE had no name line.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// First data line, verbatim.
    #[must_use]
    pub fn line1(&self) -> &str {
        &self.line1
    }

    /// Second data line, verbatim.
    #[must_use]
    pub fn line2(&self) -> &str {
        &self.line2
    }

    /// Satellite catalog number.
    #[must_use]
    pub fn catalog_number(&self) -> u32 {
        self.catalog_number
    }

    /// Ephemeris type column of line 1.
    #[must_use]
    pub fn ephemeris_type(&self) -> u8 {
        self.ephemeris_type
    }

    /// Epoch year (four digits).
    #[must_use]
    pub fn epoch_year(&self) -> i32 {
        self.epoch_year
    }

    /// Epoch day of year, with fraction.
    #[must_use]
    pub fn epoch_day(&self) -> f64 {
        self.epoch_day
    }

    /// International designator.
    #[must_use]
    pub fn designator(&self) -> &str {
        &self.designator
    }

    /// Element set number.
    #[must_use]
    pub fn element_set(&self) -> u32 {
        self.element_set
    }

    /// Revolution number at epoch.
    #[must_use]
    pub fn revolution_number(&self) -> u32 {
        self.revolution_number
    }

    /// Epoch of the element set.
    #[must_use]
    pub fn epoch(&self) -> JulianDate {
        self.epoch
    }

    /// Inclination.
    #[must_use]
    pub fn inclination(&self) -> Angle {
        Angle::new::<radian>(self.inclination)
    }

    /// Right ascension of the ascending node.
    #[must_use]
    pub fn right_ascension(&self) -> Angle {
        Angle::new::<radian>(self.right_ascension)
    }

    /// Eccentricity.
    #[must_use]
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    /// Argument of perigee.
    #[must_use]
    pub fn argument_of_perigee(&self) -> Angle {
        Angle::new::<radian>(self.argument_of_perigee)
    }

    /// Mean anomaly at epoch.
    #[must_use]
    pub fn mean_anomaly(&self) -> Angle {
        Angle::new::<radian>(self.mean_anomaly)
    }

    /// Mean motion in revolutions per day, as printed in the TLE.
    #[must_use]
    pub fn mean_motion_revs_per_day(&self) -> f64 {
        self.mean_motion_revs
    }

    /// B* drag term (1/Earth radii).
    #[must_use]
    pub fn drag_term(&self) -> f64 {
        self.bstar
    }
}

/// Modulo-10 checksum of the first 68 columns: digits count their value,
/// `-` counts one, everything else zero.
fn checksum(line: &str) -> u32 {
    line.bytes()
        .take(68)
        .map(|b| match b {
            b'0'..=b'9' => u32::from(b - b'0'),
            b'-' => 1,
            _ => 0,
        })
        .sum::<u32>()
        % 10
}

/// Validate length, line number and checksum of one data line.
fn verify_line(line: &str, number: usize) -> PredictResult<()> {
    if line.len() < 69 || !line.is_ascii() {
        return Err(PredictError::InvalidFormat {
            field: format!("line {} shorter than 69 characters", number),
        });
    }
    if line.as_bytes()[0] != b'0' + number as u8 {
        return Err(PredictError::InvalidFormat {
            field: format!("line {} has the wrong line number", number),
        });
    }
    let trailing = line[68..69]
        .parse::<u32>()
        .map_err(|_| PredictError::InvalidChecksum { line: number })?;
    if checksum(line) != trailing {
        return Err(PredictError::InvalidChecksum { line: number });
    }
    Ok(())
}

/// Parse a fixed-column numeric field, treating blanks as absent digits.
fn parse_field<T: std::str::FromStr>(
    line: &str,
    range: std::ops::Range<usize>,
    field: &str,
) -> PredictResult<T> {
    line[range]
        .trim()
        .parse::<T>()
        .map_err(|_| PredictError::InvalidFormat {
            field: field.into(),
        })
}

/// Parse an eight-column implicit-decimal exponent field (`±ddddd±e`,
/// meaning ±0.ddddd × 10^±e), the encoding of the second mean-motion
/// derivative and B*.
fn parse_exponent_field(line: &str, start: usize, field: &str) -> PredictResult<f64> {
    let raw = &line[start..start + 8];
    let sign = match raw.as_bytes()[0] {
        b'-' => -1.0,
        _ => 1.0,
    };
    let mantissa = raw[1..6].trim();
    let mantissa = if mantissa.is_empty() {
        0.0
    } else {
        format!("0.{}", mantissa)
            .parse::<f64>()
            .map_err(|_| PredictError::InvalidFormat {
                field: field.into(),
            })?
    };
    let exponent = raw[6..8]
        .trim()
        .parse::<i32>()
        .unwrap_or(0);
    Ok(sign * mantissa * 10f64.powi(exponent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uom::si::angle::degree;

    const ISS_NAME: &str = "ISS (ZARYA)";
    const ISS_LINE1: &str =
        "1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992";
    const ISS_LINE2: &str =
        "2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008";

    #[test]
    fn checksum_matches_trailing_digit() {
        assert_eq!(checksum(ISS_LINE1), 2);
        assert_eq!(checksum(ISS_LINE2), 8);
    }

    #[test]
    fn parse_iss_tle() {
        let tle = TwoLineElement::parse(&[ISS_NAME, ISS_LINE1, ISS_LINE2]).unwrap();

        assert_eq!(tle.name(), "ISS (ZARYA)");
        assert_eq!(tle.catalog_number(), 25544);
        assert_eq!(tle.designator(), "98067A");
        assert_eq!(tle.element_set(), 999);
        assert_eq!(tle.revolution_number(), 23600);
        assert!((tle.inclination().get::<degree>() - 51.6461).abs() < 1e-6);
        assert!((tle.eccentricity() - 0.0001413).abs() < 1e-9);
        assert!((tle.mean_motion_revs_per_day() - 15.49507896).abs() < 1e-7);
        // B* is -0.31515e-4.
        assert!((tle.drag_term() + 0.31515e-4).abs() < 1e-10);
    }

    #[test]
    fn units_are_converted_to_radians_per_minute() {
        let tle = TwoLineElement::parse(&[ISS_LINE1, ISS_LINE2]).unwrap();
        let expected = 15.49507896 * TWO_PI / MINUTES_PER_DAY;
        assert!((tle.mean_motion - expected).abs() < 1e-12);
        // ṅ/2 of -0.00002218 rev/day² in rad/min².
        let expected_dot = -0.00002218 * TWO_PI / MINUTES_PER_DAY / MINUTES_PER_DAY;
        assert!((tle.mean_motion_dot - expected_dot).abs() < 1e-18);
    }

    #[test]
    fn epoch_pivot_and_value() {
        let tle = TwoLineElement::parse(&[ISS_LINE1, ISS_LINE2]).unwrap();
        assert_eq!(tle.epoch_year, 2020);
        assert!((tle.epoch_day - 194.88612269).abs() < 1e-8);
        let utc = crate::time::utc_from_julian(tle.epoch()).unwrap();
        assert!(utc.to_rfc3339().starts_with("2020-07-12"));
    }

    #[test]
    fn corrupted_digit_fails_checksum() {
        let mut corrupted = ISS_LINE1.to_string();
        corrupted.replace_range(20..21, "5");
        let err = TwoLineElement::parse_lines(None, &corrupted, ISS_LINE2).unwrap_err();
        assert_eq!(err, PredictError::InvalidChecksum { line: 1 });
    }

    #[test]
    fn short_line_is_rejected() {
        let err = TwoLineElement::parse_lines(None, &ISS_LINE1[..50], ISS_LINE2).unwrap_err();
        assert!(matches!(err, PredictError::InvalidFormat { .. }));
    }

    #[test]
    fn name_is_truncated() {
        let long = "X".repeat(300);
        let tle = TwoLineElement::parse(&[&long, ISS_LINE1, ISS_LINE2]).unwrap();
        assert_eq!(tle.name().len(), 128);
    }

    #[test]
    fn negative_exponent_fields() {
        // Molniya 1-36 carries a positive B* with a -3 exponent.
        let line1 = "1 08195U 75081A   06176.33215444  .00000099  00000-0  11873-3 0   813";
        let line2 = "2 08195  64.1586 279.0717 6877146 264.7651  20.2257  2.00491383225656";
        let tle = TwoLineElement::parse_lines(None, line1, line2).unwrap();
        assert!((tle.drag_term() - 0.11873e-3).abs() < 1e-12);
        assert!((tle.eccentricity() - 0.6877146).abs() < 1e-9);
    }
}
