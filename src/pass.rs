//! Pass scheduling: acquisition and loss of signal.
//!
//! Locates the times a satellite rises above and sets below an observer's
//! horizon by composing the propagator with the observation geometry:
//! a coarse scan in steps proportional to the orbital period brackets an
//! elevation sign change, then bisection refines the crossing. Every loop
//! is bounded, so a call always terminates.

use crate::consts::MINUTES_PER_DAY;
use crate::errors::{PredictError, PredictResult};
use crate::observer::Observer;
use crate::orbit::Orbit;
use crate::time::JulianDate;

/// Elevation magnitude accepted at a refined crossing (rad): one
/// milliradian.
const ELEVATION_TOLERANCE: f64 = 1.0e-3;

/// Bracket width accepted at a refined crossing (days): one millisecond.
const TIME_TOLERANCE: f64 = 1.0e-3 / 86400.0;

/// Coarse-scan cap; at period/120 steps this spans dozens of revolutions.
const MAX_COARSE_STEPS: usize = 10_000;

/// Bisection cap; the bracket halves far past the time tolerance first.
const MAX_REFINE_STEPS: usize = 100;

/// Find the next acquisition of signal after `start`: the time the
/// satellite next rises above the observer's horizon.
///
/// If the satellite is above the horizon at `start` (or exactly on it and
/// rising), the pass in progress is skipped by first locating its loss of
/// signal, so the returned time is the AOS of the *next* pass.
///
/// At the returned time the elevation magnitude is below one milliradian
/// and the elevation rate is positive.
///
/// # Errors
///
/// [`PredictError::NotObservable`] if the satellite can never rise at the
/// observer's latitude or the orbit is geostationary;
/// [`PredictError::Decayed`] for a decayed orbit;
/// [`PredictError::ConvergenceFailure`] if no crossing is bracketed
/// within the scan bound.
pub fn next_aos(
    observer: &Observer,
    orbit: &mut Orbit,
    start: JulianDate,
) -> PredictResult<JulianDate> {
    check_observable(observer, orbit, start)?;

    let step = coarse_step(orbit);
    let observation = observe_at(observer, orbit, start)?;
    let in_pass = observation.0 > 0.0 || (observation.0 == 0.0 && observation.1 > 0.0);
    let scan_from = if in_pass {
        // Skip the pass in progress: find its LOS, then move clear of the
        // crossing before scanning for the next rise.
        next_crossing(observer, orbit, start, step, Direction::Setting)? + step
    } else {
        start
    };
    next_crossing(observer, orbit, scan_from, step, Direction::Rising)
}

/// Find the next loss of signal after `start`: the time the satellite
/// next sets below the observer's horizon.
///
/// Finds the LOS of the pass in progress if the satellite is in range at
/// `start`, otherwise the LOS of the following pass.
///
/// At the returned time the elevation magnitude is below one milliradian
/// and the elevation rate is negative.
///
/// # Errors
///
/// As for [`next_aos`].
pub fn next_los(
    observer: &Observer,
    orbit: &mut Orbit,
    start: JulianDate,
) -> PredictResult<JulianDate> {
    check_observable(observer, orbit, start)?;

    let step = coarse_step(orbit);
    let observation = observe_at(observer, orbit, start)?;
    let in_pass = observation.0 > 0.0 || (observation.0 == 0.0 && observation.1 > 0.0);
    let scan_from = if in_pass {
        start
    } else {
        next_aos(observer, orbit, start)? + step
    };
    next_crossing(observer, orbit, scan_from, step, Direction::Setting)
}

/// Horizon-crossing direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Rising,
    Setting,
}

/// Feasibility gate shared by the searches.
fn check_observable(
    observer: &Observer,
    orbit: &mut Orbit,
    start: JulianDate,
) -> PredictResult<()> {
    if !orbit.aos_happens(observer.latitude()) || orbit.is_geostationary() {
        return Err(PredictError::NotObservable);
    }
    let propagated = orbit.propagate(start);
    if orbit.decayed() {
        return Err(PredictError::Decayed);
    }
    propagated
}

/// Coarse scan step in days: 1/120 of the orbital period.
fn coarse_step(orbit: &Orbit) -> f64 {
    orbit.orbital_period() / 120.0 / MINUTES_PER_DAY
}

/// Elevation and elevation rate (rad, rad/s) at `time`.
fn observe_at(
    observer: &Observer,
    orbit: &mut Orbit,
    time: JulianDate,
) -> PredictResult<(f64, f64)> {
    orbit.propagate(time)?;
    let observation = observer.observe_orbit(orbit);
    Ok((observation.elevation, observation.elevation_rate))
}

/// Scan forward from `from` until the elevation crosses the horizon in
/// the requested direction, then refine the bracketed crossing.
fn next_crossing(
    observer: &Observer,
    orbit: &mut Orbit,
    from: JulianDate,
    step: f64,
    direction: Direction,
) -> PredictResult<JulianDate> {
    let mut t = from;
    let (mut previous, _) = observe_at(observer, orbit, t)?;
    for _ in 0..MAX_COARSE_STEPS {
        let t_next = t + step;
        let (elevation, _) = observe_at(observer, orbit, t_next)?;
        let crossed = match direction {
            Direction::Rising => previous < 0.0 && elevation >= 0.0,
            Direction::Setting => previous > 0.0 && elevation <= 0.0,
        };
        if crossed {
            return refine(observer, orbit, t, t_next, direction);
        }
        t = t_next;
        previous = elevation;
    }
    Err(PredictError::ConvergenceFailure {
        context: "horizon-crossing scan".into(),
    })
}

/// Bisect a bracketed horizon crossing until the elevation or the bracket
/// width is inside tolerance.
fn refine(
    observer: &Observer,
    orbit: &mut Orbit,
    mut below: JulianDate,
    mut above: JulianDate,
    direction: Direction,
) -> PredictResult<JulianDate> {
    // `below` holds the pre-crossing side, `above` the post-crossing side.
    let mut midpoint = 0.5 * (below + above);
    for _ in 0..MAX_REFINE_STEPS {
        midpoint = 0.5 * (below + above);
        let (elevation, _) = observe_at(observer, orbit, midpoint)?;
        if elevation.abs() < ELEVATION_TOLERANCE || (above - below) < TIME_TOLERANCE {
            return Ok(midpoint);
        }
        let pre_crossing = match direction {
            Direction::Rising => elevation < 0.0,
            Direction::Setting => elevation > 0.0,
        };
        if pre_crossing {
            below = midpoint;
        } else {
            above = midpoint;
        }
    }
    Ok(midpoint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uom::si::angle::degree;
    use uom::si::f64::{Angle, Length};
    use uom::si::length::meter;

    const ISS: [&str; 3] = [
        "ISS (ZARYA)",
        "1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992",
        "2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008",
    ];

    fn oslo() -> Observer {
        Observer::new(
            "Oslo",
            Angle::new::<degree>(59.95),
            Angle::new::<degree>(10.75),
            Length::new::<meter>(0.0),
        )
    }

    fn iss() -> Orbit {
        Orbit::from_tle(&ISS).unwrap()
    }

    #[test]
    fn aos_then_los_form_a_pass() {
        let observer = oslo();
        let mut orbit = iss();
        let start = orbit.elements().epoch();

        let aos = next_aos(&observer, &mut orbit, start).unwrap();
        assert!(aos > start);
        assert!(aos - start < 1.0, "next pass more than a day away");

        let los = next_los(&observer, &mut orbit, aos + 1.0 / MINUTES_PER_DAY).unwrap();
        assert!(los > aos);
        // An ISS pass lasts minutes, not hours.
        assert!((los - aos) * MINUTES_PER_DAY < 25.0);
    }

    #[test]
    fn elevation_is_small_and_rates_have_the_right_sign_at_crossings() {
        let observer = oslo();
        let mut orbit = iss();
        let start = orbit.elements().epoch();

        let aos = next_aos(&observer, &mut orbit, start).unwrap();
        let (elevation, rate) = observe_at(&observer, &mut orbit, aos).unwrap();
        assert!(elevation.abs() < ELEVATION_TOLERANCE);
        assert!(rate > 0.0);

        let los = next_los(&observer, &mut orbit, start).unwrap();
        let (elevation, rate) = observe_at(&observer, &mut orbit, los).unwrap();
        assert!(elevation.abs() < ELEVATION_TOLERANCE);
        assert!(rate < 0.0);
    }

    #[test]
    fn aos_skips_a_pass_in_progress() {
        let observer = oslo();
        let mut orbit = iss();
        let start = orbit.elements().epoch();

        let aos = next_aos(&observer, &mut orbit, start).unwrap();
        let los = next_los(&observer, &mut orbit, aos + 1.0 / MINUTES_PER_DAY).unwrap();

        // From the middle of the pass, the next AOS is after its LOS.
        let middle = 0.5 * (aos + los);
        let next = next_aos(&observer, &mut orbit, middle).unwrap();
        assert!(next > los);
    }

    #[test]
    fn successive_passes_are_ordered() {
        let observer = oslo();
        let mut orbit = iss();
        let mut t = orbit.elements().epoch();
        let mut previous_aos = t;
        for _ in 0..3 {
            let aos = next_aos(&observer, &mut orbit, t).unwrap();
            assert!(aos > previous_aos);
            previous_aos = aos;
            t = aos + 2.0 / MINUTES_PER_DAY;
        }
    }

    #[test]
    fn unobservable_latitude_is_rejected() {
        let polar_station = Observer::new(
            "Alert",
            Angle::new::<degree>(85.0),
            Angle::new::<degree>(-62.3),
            Length::new::<meter>(30.0),
        );
        let mut orbit = iss();
        let start = orbit.elements().epoch();
        assert_eq!(
            next_aos(&polar_station, &mut orbit, start).unwrap_err(),
            PredictError::NotObservable
        );
    }

    #[test]
    fn geostationary_orbit_is_rejected() {
        fn patch_checksum(line: &str) -> String {
            let sum: u32 = line
                .bytes()
                .take(68)
                .map(|b| match b {
                    b'0'..=b'9' => u32::from(b - b'0'),
                    b'-' => 1,
                    _ => 0,
                })
                .sum();
            format!("{}{}", &line[..68], sum % 10)
        }
        let line1 = patch_checksum(
            "1 11145U 78113A   20200.00000000  .00000000  00000-0  00000-0 0  9990",
        );
        let line2 = patch_checksum(
            "2 11145   0.0500  90.0000 0002000 180.0000 180.0000  1.00270000 12340",
        );
        let mut orbit = Orbit::from_lines(None, &line1, &line2).unwrap();
        let start = orbit.elements().epoch();
        assert_eq!(
            next_aos(&oslo(), &mut orbit, start).unwrap_err(),
            PredictError::NotObservable
        );
    }

    #[test]
    fn decayed_orbit_is_rejected() {
        let mut orbit = iss();
        // Decades past epoch the projected decay has long passed.
        let start = orbit.elements().epoch() + 7300.0;
        assert_eq!(
            next_aos(&oslo(), &mut orbit, start).unwrap_err(),
            PredictError::Decayed
        );
    }
}
