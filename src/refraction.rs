//! Atmospheric refraction corrections.
//!
//! Saemundsson's formula maps true elevation to the refraction angle;
//! Bennett's inverse formula maps apparent elevation back. Both carry the
//! standard pressure/temperature scaling and default to 101.0 kPa and
//! 10 °C. All angles are radians; rates are radians per second.

/// Default atmospheric pressure (kPa).
const DEFAULT_PRESSURE: f64 = 101.0;

/// Default temperature (°C).
const DEFAULT_TEMPERATURE: f64 = 10.0;

/// Pressure/temperature scaling relative to the standard atmosphere.
fn atmosphere_scale(pressure_kpa: f64, temperature_c: f64) -> f64 {
    pressure_kpa / 101.0 * (283.0 / (273.0 + temperature_c))
}

/// Refraction angle for a true elevation, standard atmosphere.
#[must_use]
pub fn refraction(elevation: f64) -> f64 {
    refraction_ext(elevation, DEFAULT_PRESSURE, DEFAULT_TEMPERATURE)
}

/// Refraction angle for a true elevation (Saemundsson), corrected for
/// pressure (kPa) and temperature (°C).
#[must_use]
pub fn refraction_ext(elevation: f64, pressure_kpa: f64, temperature_c: f64) -> f64 {
    let el_deg = elevation.to_degrees();
    // Arcminutes of refraction
    let arcmin = 1.02 / ((el_deg + 10.3 / (el_deg + 5.11)).to_radians()).tan();
    (arcmin / 60.0).to_radians() * atmosphere_scale(pressure_kpa, temperature_c)
}

/// Refraction angle for an apparent elevation, standard atmosphere.
#[must_use]
pub fn refraction_from_apparent(apparent_elevation: f64) -> f64 {
    refraction_from_apparent_ext(apparent_elevation, DEFAULT_PRESSURE, DEFAULT_TEMPERATURE)
}

/// Refraction angle for an apparent elevation (Bennett), corrected for
/// pressure (kPa) and temperature (°C).
#[must_use]
pub fn refraction_from_apparent_ext(
    apparent_elevation: f64,
    pressure_kpa: f64,
    temperature_c: f64,
) -> f64 {
    let el_deg = apparent_elevation.to_degrees();
    let arcmin = 1.0 / ((el_deg + 7.31 / (el_deg + 4.4)).to_radians()).tan();
    (arcmin / 60.0).to_radians() * atmosphere_scale(pressure_kpa, temperature_c)
}

/// Rate of change of the refraction angle for a true elevation and
/// elevation rate, standard atmosphere.
#[must_use]
pub fn refraction_rate(elevation: f64, elevation_rate: f64) -> f64 {
    refraction_rate_ext(
        elevation,
        elevation_rate,
        DEFAULT_PRESSURE,
        DEFAULT_TEMPERATURE,
    )
}

/// Rate of change of the refraction angle, corrected for pressure (kPa)
/// and temperature (°C). Analytic derivative of the Saemundsson formula.
#[must_use]
pub fn refraction_rate_ext(
    elevation: f64,
    elevation_rate: f64,
    pressure_kpa: f64,
    temperature_c: f64,
) -> f64 {
    let el_deg = elevation.to_degrees();
    let argument = (el_deg + 10.3 / (el_deg + 5.11)).to_radians();
    let argument_slope = 1.0 - 10.3 / ((el_deg + 5.11) * (el_deg + 5.11));
    // d(refraction)/d(elevation), dimensionless; the degree factors of the
    // argument and of the elevation cancel.
    let derivative =
        -(1.02_f64 / 60.0).to_radians() * argument_slope / (argument.sin() * argument.sin());
    derivative * atmosphere_scale(pressure_kpa, temperature_c) * elevation_rate
}

/// Apparent elevation for a true elevation, standard atmosphere.
#[must_use]
pub fn apparent_elevation(elevation: f64) -> f64 {
    apparent_elevation_ext(elevation, DEFAULT_PRESSURE, DEFAULT_TEMPERATURE)
}

/// Apparent elevation for a true elevation, corrected for pressure (kPa)
/// and temperature (°C).
#[must_use]
pub fn apparent_elevation_ext(elevation: f64, pressure_kpa: f64, temperature_c: f64) -> f64 {
    elevation + refraction_ext(elevation, pressure_kpa, temperature_c)
}

/// Rate of change of the apparent elevation, standard atmosphere.
#[must_use]
pub fn apparent_elevation_rate(elevation: f64, elevation_rate: f64) -> f64 {
    apparent_elevation_rate_ext(
        elevation,
        elevation_rate,
        DEFAULT_PRESSURE,
        DEFAULT_TEMPERATURE,
    )
}

/// Rate of change of the apparent elevation, corrected for pressure (kPa)
/// and temperature (°C).
#[must_use]
pub fn apparent_elevation_rate_ext(
    elevation: f64,
    elevation_rate: f64,
    pressure_kpa: f64,
    temperature_c: f64,
) -> f64 {
    elevation_rate + refraction_rate_ext(elevation, elevation_rate, pressure_kpa, temperature_c)
}
