//! Physical and geopotential constants shared by the propagation models.
//!
//! The gravity-field harmonics follow the WGS-72 values the SGP4/SDP4
//! models were fitted against; Earth geometry (radius, flattening) is
//! WGS-84. All constants are process-wide, compile-time values.

/// 2π.
pub const TWO_PI: f64 = std::f64::consts::PI * 2.0;

/// Minutes per day.
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// Seconds per day.
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// J2000.0 epoch as an astronomical Julian Date.
pub const J2000_JD: f64 = 2451545.0;

/// Days per Julian century.
pub const DAYS_PER_CENTURY: f64 = 36525.0;

/// WGS-84 Earth equatorial radius (km).
pub const EARTH_RADIUS_KM: f64 = 6.378137e3;

/// WGS-84 flattening factor.
pub const FLATTENING: f64 = 3.35281066474748e-3;

/// Earth radius in the propagators' internal distance unit (Earth radii).
pub const AE: f64 = 1.0;

/// J2 harmonic (WGS-72).
pub const J2: f64 = 1.0826158e-3;

/// J3 harmonic (WGS-72).
pub const J3: f64 = -2.53881e-6;

/// J4 harmonic (WGS-72).
pub const J4: f64 = -1.65597e-6;

/// √(GM⊕) in (Earth radii / minute)^(3/2).
pub const XKE: f64 = 7.43669161e-2;

/// Second-harmonic coefficient ½ J2 aₑ², used throughout SGP4/SDP4.
pub const CK2: f64 = 5.413079e-4;

/// Fourth-harmonic coefficient −⅜ J4 aₑ⁴.
pub const CK4: f64 = 6.209887e-7;

/// Density parameter s (Earth radii).
pub const S_DENSITY: f64 = 1.012229;

/// (q₀ − s)⁴ in Earth radii⁴.
pub const QOMS2T: f64 = 1.880279e-9;

/// Earth rotations per sidereal day.
pub const OMEGA_E: f64 = 1.00273790934;

/// Earth rotation rate (rad/s) for observer velocity in the ECI frame.
pub const MFACTOR: f64 = 7.292115e-5;

/// Earth rotation rate (rad/min) used by the deep-space resonance terms.
pub const THDT: f64 = 4.3752691e-3;

/// Solar mean motion (rad/min).
pub const ZNS: f64 = 1.19459e-5;

/// Solar perturbation coefficient.
pub const C1SS: f64 = 2.9864797e-6;

/// Solar orbit eccentricity.
pub const ZES: f64 = 1.675e-2;

/// Lunar mean motion (rad/min).
pub const ZNL: f64 = 1.5835218e-4;

/// Lunar perturbation coefficient.
pub const C1L: f64 = 4.7968065e-7;

/// Lunar orbit eccentricity.
pub const ZEL: f64 = 5.490e-2;

/// Cosine of the solar inclination on the TLE reference plane.
pub const ZCOSIS: f64 = 9.1744867e-1;

/// Sine of the solar inclination.
pub const ZSINIS: f64 = 3.9785416e-1;

/// Sine of the solar argument of perigee.
pub const ZSINGS: f64 = -9.8088458e-1;

/// Cosine of the solar argument of perigee.
pub const ZCOSGS: f64 = 1.945905e-1;

/// Geopotential resonance coefficients for the 24-hour terms.
pub const Q22: f64 = 1.7891679e-6;
/// Geopotential resonance coefficient q₃₁.
pub const Q31: f64 = 2.1460748e-6;
/// Geopotential resonance coefficient q₃₃.
pub const Q33: f64 = 2.2123015e-7;

/// Resonance phase angle G₂₂ (rad).
pub const G22: f64 = 5.7686396;
/// Resonance phase angle G₃₂ (rad).
pub const G32: f64 = 9.5240898e-1;
/// Resonance phase angle G₄₄ (rad).
pub const G44: f64 = 1.8014998;
/// Resonance phase angle G₅₂ (rad).
pub const G52: f64 = 1.0508330;
/// Resonance phase angle G₅₄ (rad).
pub const G54: f64 = 4.4108898;

/// Half-day resonance root coefficients.
pub const ROOT22: f64 = 1.7891679e-6;
/// Half-day resonance root coefficient √₃₂.
pub const ROOT32: f64 = 3.7393792e-7;
/// Half-day resonance root coefficient √₄₄.
pub const ROOT44: f64 = 7.3636953e-9;
/// Half-day resonance root coefficient √₅₂.
pub const ROOT52: f64 = 1.1428639e-7;
/// Half-day resonance root coefficient √₅₄.
pub const ROOT54: f64 = 2.1765803e-9;

/// Solar radius (km, IAU 76).
pub const SOLAR_RADIUS_KM: f64 = 6.96000e5;

/// Astronomical unit (km, IAU 76).
pub const AU_KM: f64 = 1.49597870691e8;

/// Speed of light in vacuum (m/s, exact by definition).
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geopotential_constants_are_consistent() {
        // CK2 = ½ J2 aₑ², CK4 = −⅜ J4 aₑ⁴
        assert!((CK2 - 0.5 * J2 * AE * AE).abs() < 1e-9);
        assert!((CK4 - (-0.375) * J4 * AE.powi(4)).abs() < 1e-10);
    }

    #[test]
    fn earth_geometry_is_wgs84() {
        assert!((EARTH_RADIUS_KM - 6378.137).abs() < 1e-9);
        assert!((1.0 / FLATTENING - 298.257).abs() < 0.01);
    }
}
