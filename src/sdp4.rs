//! Deep-space propagation model (SDP4).
//!
//! Extends the near-Earth model for orbital periods of 225 minutes and
//! longer: secular and long-period lunisolar perturbations, Earth-
//! oblateness long-period effects, and the geopotential resonance terms
//! for 24-hour (geosynchronous) and 12-hour (Molniya) orbits.
//!
//! Resonant orbits carry the only mutable propagation state in the crate:
//! a fixed-step integrator for the resonance mean longitude and mean
//! motion. The integrator is re-initialized to epoch whenever a requested
//! time lies on the opposite side of epoch from its current position, or
//! nearer to epoch, so predictions are a pure function of the element set
//! and the requested time regardless of call history.

use nalgebra::Vector3;

use crate::consts::{
    C1L, C1SS, G22, G32, G44, G52, G54, Q22, Q31, Q33, ROOT22, ROOT32, ROOT44, ROOT52, ROOT54,
    THDT, XKE, ZCOSGS, ZCOSIS, ZEL, ZES, ZNL, ZNS, ZSINGS, ZSINIS,
};
use crate::coord::wrap_two_pi;
use crate::errors::{PredictError, PredictResult};
use crate::sgp4::{kepler_to_state, NearEarth, ShortPeriod};
use crate::tle::TwoLineElement;

/// Resonance integrator step (minutes).
const STEP: f64 = 720.0;
/// Half the squared step, for the second-order term.
const STEP2: f64 = 259200.0;

/// Synchronous-resonance phase angles.
const FASX2: f64 = 0.13130908;
const FASX4: f64 = 2.8843198;
const FASX6: f64 = 0.37448087;

/// Geopotential resonance classification, fixed at initialization.
#[derive(Clone, Copy, Debug)]
enum Resonance {
    /// No resonance terms apply.
    None,
    /// 24-hour geosynchronous resonance.
    Synchronous { del1: f64, del2: f64, del3: f64 },
    /// 12-hour Molniya-type resonance.
    HalfDay {
        d2201: f64,
        d2211: f64,
        d3210: f64,
        d3222: f64,
        d4410: f64,
        d4422: f64,
        d5220: f64,
        d5232: f64,
        d5421: f64,
        d5433: f64,
    },
}

/// Lunisolar coefficient set for one perturbing body.
struct BodyCoefficients {
    se: f64,
    si: f64,
    sl: f64,
    sgh: f64,
    sh: f64,
    e2: f64,
    e3: f64,
    xi2: f64,
    xi3: f64,
    xl2: f64,
    xl3: f64,
    xl4: f64,
    xgh2: f64,
    xgh3: f64,
    xgh4: f64,
    xh2: f64,
    xh3: f64,
}

/// The deep-space model with its per-orbit initialization cache and the
/// mutable resonance integrator.
#[derive(Clone, Debug)]
pub(crate) struct DeepSpace {
    // Elements at epoch
    eo: f64,
    omegao: f64,
    xmo: f64,
    xnodeo: f64,
    xincl: f64,
    bstar: f64,

    // Near-Earth constants shared with SGP4
    xnodp: f64,
    c1: f64,
    c4: f64,
    t2cof: f64,
    xnodcf: f64,
    xmdot: f64,
    omgdot: f64,
    xnodot: f64,
    sp: ShortPeriod,

    // Deep-space secular rates
    sse: f64,
    ssi: f64,
    ssl: f64,
    ssg: f64,
    ssh: f64,

    // Solar long-period coefficients
    se2: f64,
    se3: f64,
    si2: f64,
    si3: f64,
    sl2: f64,
    sl3: f64,
    sl4: f64,
    sgh2: f64,
    sgh3: f64,
    sgh4: f64,
    sh2: f64,
    sh3: f64,

    // Lunar long-period coefficients
    ee2: f64,
    e3: f64,
    xi2: f64,
    xi3: f64,
    xl2: f64,
    xl3: f64,
    xl4: f64,
    xgh2: f64,
    xgh3: f64,
    xgh4: f64,
    xh2: f64,
    xh3: f64,

    // Lunisolar mean anomalies at epoch
    zmos: f64,
    zmol: f64,

    // Resonance terms and integrator state
    resonance: Resonance,
    thgr: f64,
    xlamo: f64,
    xfact: f64,
    xnq: f64,
    omegaq: f64,
    atime: f64,
    xli: f64,
    xni: f64,
}

impl DeepSpace {
    /// One-time initialization from a parsed element set.
    pub(crate) fn new(tle: &TwoLineElement) -> Self {
        let base = NearEarth::new(tle);

        let eo = tle.eccentricity;
        let xincl = tle.inclination;
        let omegao = tle.argument_of_perigee;
        let xmo = tle.mean_anomaly;
        let xnodeo = tle.right_ascension;

        let eosq = eo * eo;
        let betao2 = 1.0 - eosq;
        let betao = betao2.sqrt();
        let (sing, cosg) = omegao.sin_cos();
        let (sinq, cosq) = xnodeo.sin_cos();
        let cosio = base.sp.cosio;
        let sinio = base.sp.sinio;
        let aodp = base.aodp;
        let xnq = base.xnodp;
        let aqnv = 1.0 / aodp;
        let xnoi = 1.0 / xnq;

        // Sidereal time at epoch and days since 1950 Jan 0.0 for the
        // lunisolar epoch geometry.
        let ds50 = tle.epoch + 10957.0;
        let thgr = wrap_two_pi(6.3003880987 * ds50 + 1.72944494);
        let day = ds50 + 18261.5;

        // Lunar node, inclination and argument geometry at epoch
        let xnodce = 4.5236020 - 9.2422029e-4 * day;
        let (stem, ctem) = xnodce.sin_cos();
        let zcosil = 0.91375164 - 0.03568096 * ctem;
        let zsinil = (1.0 - zcosil * zcosil).sqrt();
        let zsinhl = 0.089683511 * stem / zsinil;
        let zcoshl = (1.0 - zsinhl * zsinhl).sqrt();
        let c = 4.7199672 + 0.22997150 * day;
        let gam = 5.8351514 + 0.0019443680 * day;
        let zmol = wrap_two_pi(c - gam);
        let zx = 0.39785416 * stem / zsinil;
        let zy = zcoshl * ctem + 0.91744867 * zsinhl * stem;
        let zx = gam + zx.atan2(zy) - xnodce;
        let (zsingl, zcosgl) = zx.sin_cos();
        let zmos = wrap_two_pi(6.2565837 + 0.017201977 * day);

        let geometry = OrbitGeometry {
            eq: eo,
            eosq,
            betao,
            betao2,
            sing,
            cosg,
            sinio,
            cosio,
            xqncl: xincl,
            xnoi,
        };

        // Solar terms, then lunar terms with the epoch lunar geometry.
        let solar = lunisolar_coefficients(
            &geometry, ZCOSGS, ZSINGS, ZCOSIS, ZSINIS, cosq, sinq, C1SS, ZNS, ZES,
        );
        let lunar = lunisolar_coefficients(
            &geometry,
            zcosgl,
            zsingl,
            zcosil,
            zsinil,
            zcoshl * cosq + zsinhl * sinq,
            sinq * zcoshl - cosq * zsinhl,
            C1L,
            ZNL,
            ZEL,
        );

        let sse = solar.se + lunar.se;
        let ssi = solar.si + lunar.si;
        let ssl = solar.sl + lunar.sl;
        let ssh = (solar.sh + lunar.sh) / sinio;
        let ssg = solar.sgh + lunar.sgh - cosio * ssh;

        // Resonance classification and coefficients
        let synchronous = xnq > 0.0034906585 && xnq < 0.0052359877 && eo < 0.5;
        let half_day = (0.00826..=0.00924).contains(&xnq) && eo >= 0.5;

        let theta2 = cosio * cosio;
        let sini2 = sinio * sinio;

        let (resonance, xlamo, bfact) = if synchronous {
            let g200 = 1.0 + eosq * (-2.5 + 0.8125 * eosq);
            let g310 = 1.0 + 2.0 * eosq;
            let g300 = 1.0 + eosq * (-6.0 + 6.60937 * eosq);
            let f220 = 0.75 * (1.0 + cosio) * (1.0 + cosio);
            let f311 = 0.9375 * sini2 * (1.0 + 3.0 * cosio) - 0.75 * (1.0 + cosio);
            let f330 = 1.875 * (1.0 + cosio).powi(3);
            let del = 3.0 * xnq * xnq * aqnv * aqnv;
            let del2 = 2.0 * del * f220 * g200 * Q22;
            let del3 = 3.0 * del * f330 * g300 * Q33 * aqnv;
            let del1 = del * f311 * g310 * Q31 * aqnv;
            let xlamo = xmo + xnodeo + omegao - thgr;
            let bfact = base.xmdot + (base.omgdot + base.xnodot) - THDT + ssl + ssg + ssh;
            (Resonance::Synchronous { del1, del2, del3 }, xlamo, bfact)
        } else if half_day {
            let eoc = eo * eosq;
            let g201 = -0.306 - (eo - 0.64) * 0.440;
            let (g211, g310, g322, g410, g422, g520) = if eo <= 0.65 {
                (
                    3.616 - 13.247 * eo + 16.290 * eosq,
                    -19.302 + 117.390 * eo - 228.419 * eosq + 156.591 * eoc,
                    -18.9068 + 109.7927 * eo - 214.6334 * eosq + 146.5816 * eoc,
                    -41.122 + 242.694 * eo - 471.094 * eosq + 313.953 * eoc,
                    -146.407 + 841.880 * eo - 1629.014 * eosq + 1083.435 * eoc,
                    -532.114 + 3017.977 * eo - 5740.032 * eosq + 3708.276 * eoc,
                )
            } else {
                (
                    -72.099 + 331.819 * eo - 508.738 * eosq + 266.724 * eoc,
                    -346.844 + 1582.851 * eo - 2415.925 * eosq + 1246.113 * eoc,
                    -342.585 + 1554.908 * eo - 2366.899 * eosq + 1215.972 * eoc,
                    -1052.797 + 4758.686 * eo - 7193.992 * eosq + 3651.957 * eoc,
                    -3581.690 + 16178.110 * eo - 24462.770 * eosq + 12422.520 * eoc,
                    if eo <= 0.715 {
                        1464.74 - 4664.75 * eo + 3763.64 * eosq
                    } else {
                        -5149.66 + 29936.92 * eo - 54087.36 * eosq + 31324.56 * eoc
                    },
                )
            };
            let (g533, g521, g532) = if eo < 0.7 {
                (
                    -919.2277 + 4988.610 * eo - 9064.770 * eosq + 5542.21 * eoc,
                    -822.71072 + 4568.6173 * eo - 8491.4146 * eosq + 5337.524 * eoc,
                    -853.666 + 4690.250 * eo - 8624.770 * eosq + 5341.4 * eoc,
                )
            } else {
                (
                    -37995.780 + 161616.52 * eo - 229838.20 * eosq + 109377.94 * eoc,
                    -51752.104 + 218913.95 * eo - 309468.16 * eosq + 146349.42 * eoc,
                    -40023.880 + 170470.89 * eo - 242699.48 * eosq + 115605.82 * eoc,
                )
            };
            let f220 = 0.75 * (1.0 + 2.0 * cosio + theta2);
            let f221 = 1.5 * sini2;
            let f321 = 1.875 * sinio * (1.0 - 2.0 * cosio - 3.0 * theta2);
            let f322 = -1.875 * sinio * (1.0 + 2.0 * cosio - 3.0 * theta2);
            let f441 = 35.0 * sini2 * f220;
            let f442 = 39.375 * sini2 * sini2;
            let f522 = 9.84375
                * sinio
                * (sini2 * (1.0 - 2.0 * cosio - 5.0 * theta2)
                    + 0.33333333 * (-2.0 + 4.0 * cosio + 6.0 * theta2));
            let f523 = sinio
                * (4.92187512 * sini2 * (-2.0 - 4.0 * cosio + 10.0 * theta2)
                    + 6.56250012 * (1.0 + 2.0 * cosio - 3.0 * theta2));
            let f542 = 29.53125
                * sinio
                * (2.0 - 8.0 * cosio + theta2 * (-12.0 + 8.0 * cosio + 10.0 * theta2));
            let f543 = 29.53125
                * sinio
                * (-2.0 - 8.0 * cosio + theta2 * (12.0 + 8.0 * cosio - 10.0 * theta2));
            let xno2 = xnq * xnq;
            let ainv2 = aqnv * aqnv;
            let mut temp1 = 3.0 * xno2 * ainv2;
            let temp = temp1 * ROOT22;
            let d2201 = temp * f220 * g201;
            let d2211 = temp * f221 * g211;
            temp1 *= aqnv;
            let temp = temp1 * ROOT32;
            let d3210 = temp * f321 * g310;
            let d3222 = temp * f322 * g322;
            temp1 *= aqnv;
            let temp = 2.0 * temp1 * ROOT44;
            let d4410 = temp * f441 * g410;
            let d4422 = temp * f442 * g422;
            temp1 *= aqnv;
            let temp = temp1 * ROOT52;
            let d5220 = temp * f522 * g520;
            let d5232 = temp * f523 * g532;
            let temp = 2.0 * temp1 * ROOT54;
            let d5421 = temp * f542 * g521;
            let d5433 = temp * f543 * g533;
            let xlamo = xmo + 2.0 * xnodeo - 2.0 * thgr;
            let bfact = base.xmdot + 2.0 * base.xnodot - 2.0 * THDT + ssl + 2.0 * ssh;
            (
                Resonance::HalfDay {
                    d2201,
                    d2211,
                    d3210,
                    d3222,
                    d4410,
                    d4422,
                    d5220,
                    d5232,
                    d5421,
                    d5433,
                },
                xlamo,
                bfact,
            )
        } else {
            (Resonance::None, 0.0, 0.0)
        };

        Self {
            eo,
            omegao,
            xmo,
            xnodeo,
            xincl,
            bstar: tle.bstar,
            xnodp: base.xnodp,
            c1: base.c1,
            c4: base.c4,
            t2cof: base.t2cof,
            xnodcf: base.xnodcf,
            xmdot: base.xmdot,
            omgdot: base.omgdot,
            xnodot: base.xnodot,
            sp: base.sp,
            sse,
            ssi,
            ssl,
            ssg,
            ssh,
            se2: solar.e2,
            se3: solar.e3,
            si2: solar.xi2,
            si3: solar.xi3,
            sl2: solar.xl2,
            sl3: solar.xl3,
            sl4: solar.xl4,
            sgh2: solar.xgh2,
            sgh3: solar.xgh3,
            sgh4: solar.xgh4,
            sh2: solar.xh2,
            sh3: solar.xh3,
            ee2: lunar.e2,
            e3: lunar.e3,
            xi2: lunar.xi2,
            xi3: lunar.xi3,
            xl2: lunar.xl2,
            xl3: lunar.xl3,
            xl4: lunar.xl4,
            xgh2: lunar.xgh2,
            xgh3: lunar.xgh3,
            xgh4: lunar.xgh4,
            xh2: lunar.xh2,
            xh3: lunar.xh3,
            zmos,
            zmol,
            resonance,
            thgr,
            xlamo,
            xfact: bfact - xnq,
            xnq,
            omegaq: omegao,
            atime: 0.0,
            xli: xlamo,
            xni: xnq,
        }
    }

    /// ECI position (km) and velocity (km/s) at `tsince` minutes from the
    /// element-set epoch.
    pub(crate) fn position_velocity(
        &mut self,
        tsince: f64,
    ) -> PredictResult<(Vector3<f64>, Vector3<f64>)> {
        // Secular gravity and drag, as in the near-Earth model but without
        // the higher-order drag expansion.
        let xmdf = self.xmo + self.xmdot * tsince;
        let omgadf = self.omegao + self.omgdot * tsince;
        let xnoddf = self.xnodeo + self.xnodot * tsince;
        let tsq = tsince * tsince;
        let xnode = xnoddf + self.xnodcf * tsq;
        let tempa = 1.0 - self.c1 * tsince;
        let tempe = self.bstar * self.c4 * tsince;
        let templ = self.t2cof * tsq;

        // Deep-space secular effects and resonance integration
        let (xll, omgadf, xnode, mut em, xinc, xn) =
            self.deep_secular(tsince, xmdf, omgadf, xnode);

        let a = (XKE / xn).powf(2.0 / 3.0) * tempa * tempa;
        if a < 1.0 {
            return Err(PredictError::Decayed);
        }
        em -= tempe;
        if !(-0.001..1.0).contains(&em) {
            return Err(PredictError::Decayed);
        }
        let xmam = xll + self.xnodp * templ;

        // Deep-space long-period periodics
        let (em, xinc, omgadf, xnode, xmam) =
            self.deep_periodic(tsince, em, xinc, omgadf, xnode, xmam);

        let xl = xmam + omgadf + xnode;
        let e = em.clamp(1.0e-6, 1.0 - 1.0e-6);
        let xn = XKE / a.powf(1.5);

        kepler_to_state(a, e, xl, xnode, omgadf, xinc, xn, &self.sp)
    }

    /// Recovered mean motion (rad/min).
    pub(crate) fn mean_motion(&self) -> f64 {
        self.xnodp
    }

    /// Deep-space secular rates plus the resonance integrator.
    ///
    /// Returns `(xll, omgadf, xnode, em, xinc, xn)` at `t` minutes.
    fn deep_secular(
        &mut self,
        t: f64,
        xll: f64,
        omgadf: f64,
        xnode: f64,
    ) -> (f64, f64, f64, f64, f64, f64) {
        let mut xll = xll + self.ssl * t;
        let mut omgadf = omgadf + self.ssg * t;
        let mut xnode = xnode + self.ssh * t;
        let em = self.eo + self.sse * t;
        let mut xinc = self.xincl + self.ssi * t;
        if xinc < 0.0 {
            xinc = -xinc;
            xnode += std::f64::consts::PI;
            omgadf -= std::f64::consts::PI;
        }

        if matches!(self.resonance, Resonance::None) {
            return (xll, omgadf, xnode, em, xinc, self.xnodp);
        }

        // The integrator only ever marches away from epoch in 720-minute
        // quanta; restart it whenever the requested time is on the other
        // side of epoch or closer to epoch than the accumulated state, so
        // that the result does not depend on the call history.
        if t * self.atime <= 0.0 || t.abs() < self.atime.abs() {
            self.atime = 0.0;
            self.xni = self.xnq;
            self.xli = self.xlamo;
        }

        let delt = if t >= 0.0 { STEP } else { -STEP };
        while (t - self.atime).abs() >= STEP {
            let (xndot, xnddt, xldot) = self.resonance_rates();
            self.xli += xldot * delt + xndot * STEP2;
            self.xni += xndot * delt + xnddt * STEP2;
            self.atime += delt;
        }

        // Final partial step by quadratic interpolation
        let ft = t - self.atime;
        let (xndot, xnddt, xldot) = self.resonance_rates();
        let xn = self.xni + xndot * ft + xnddt * ft * ft * 0.5;
        let xl = self.xli + xldot * ft + xndot * ft * ft * 0.5;

        let temp = -xnode + self.thgr + t * THDT;
        xll = match self.resonance {
            Resonance::Synchronous { .. } => xl - omgadf + temp,
            _ => xl + temp + temp,
        };
        (xll, omgadf, xnode, em, xinc, xn)
    }

    /// Time derivatives of the resonance mean motion and mean longitude at
    /// the current integrator state.
    fn resonance_rates(&self) -> (f64, f64, f64) {
        let xli = self.xli;
        let (xndot, mut xnddt) = match self.resonance {
            Resonance::Synchronous { del1, del2, del3 } => (
                del1 * (xli - FASX2).sin()
                    + del2 * (2.0 * (xli - FASX4)).sin()
                    + del3 * (3.0 * (xli - FASX6)).sin(),
                del1 * (xli - FASX2).cos()
                    + 2.0 * del2 * (2.0 * (xli - FASX4)).cos()
                    + 3.0 * del3 * (3.0 * (xli - FASX6)).cos(),
            ),
            Resonance::HalfDay {
                d2201,
                d2211,
                d3210,
                d3222,
                d4410,
                d4422,
                d5220,
                d5232,
                d5421,
                d5433,
            } => {
                let xomi = self.omegaq + self.omgdot * self.atime;
                let x2omi = xomi + xomi;
                let x2li = xli + xli;
                (
                    d2201 * (x2omi + xli - G22).sin()
                        + d2211 * (xli - G22).sin()
                        + d3210 * (xomi + xli - G32).sin()
                        + d3222 * (-xomi + xli - G32).sin()
                        + d4410 * (x2omi + x2li - G44).sin()
                        + d4422 * (x2li - G44).sin()
                        + d5220 * (xomi + xli - G52).sin()
                        + d5232 * (-xomi + xli - G52).sin()
                        + d5421 * (xomi + x2li - G54).sin()
                        + d5433 * (-xomi + x2li - G54).sin(),
                    d2201 * (x2omi + xli - G22).cos()
                        + d2211 * (xli - G22).cos()
                        + d3210 * (xomi + xli - G32).cos()
                        + d3222 * (-xomi + xli - G32).cos()
                        + d5220 * (xomi + xli - G52).cos()
                        + d5232 * (-xomi + xli - G52).cos()
                        + 2.0
                            * (d4410 * (x2omi + x2li - G44).cos()
                                + d4422 * (x2li - G44).cos()
                                + d5421 * (xomi + x2li - G54).cos()
                                + d5433 * (-xomi + x2li - G54).cos()),
                )
            }
            Resonance::None => (0.0, 0.0),
        };
        let xldot = self.xni + self.xfact;
        xnddt *= xldot;
        (xndot, xnddt, xldot)
    }

    /// Lunisolar long-period periodic corrections.
    ///
    /// Returns `(em, xinc, omgadf, xnode, xll)` with the periodics applied,
    /// using the Lyddane formulation below 0.2 rad inclination.
    fn deep_periodic(
        &self,
        t: f64,
        em: f64,
        xinc: f64,
        omgadf: f64,
        xnode: f64,
        xll: f64,
    ) -> (f64, f64, f64, f64, f64) {
        // Solar periodics
        let zm = self.zmos + ZNS * t;
        let zf = zm + 2.0 * ZES * zm.sin();
        let sinzf = zf.sin();
        let f2 = 0.5 * sinzf * sinzf - 0.25;
        let f3 = -0.5 * sinzf * zf.cos();
        let ses = self.se2 * f2 + self.se3 * f3;
        let sis = self.si2 * f2 + self.si3 * f3;
        let sls = self.sl2 * f2 + self.sl3 * f3 + self.sl4 * sinzf;
        let sghs = self.sgh2 * f2 + self.sgh3 * f3 + self.sgh4 * sinzf;
        let shs = self.sh2 * f2 + self.sh3 * f3;

        // Lunar periodics
        let zm = self.zmol + ZNL * t;
        let zf = zm + 2.0 * ZEL * zm.sin();
        let sinzf = zf.sin();
        let f2 = 0.5 * sinzf * sinzf - 0.25;
        let f3 = -0.5 * sinzf * zf.cos();
        let sel = self.ee2 * f2 + self.e3 * f3;
        let sil = self.xi2 * f2 + self.xi3 * f3;
        let sll = self.xl2 * f2 + self.xl3 * f3 + self.xl4 * sinzf;
        let sghl = self.xgh2 * f2 + self.xgh3 * f3 + self.xgh4 * sinzf;
        let shl = self.xh2 * f2 + self.xh3 * f3;

        let pe = ses + sel;
        let pinc = sis + sil;
        let pl = sls + sll;
        let pgh = sghs + sghl;
        let ph = shs + shl;

        let (sinis, cosis) = xinc.sin_cos();
        let xinc = xinc + pinc;
        let em = em + pe;

        if self.xincl >= 0.2 {
            // Apply periodics directly
            let ph = ph / self.sp.sinio;
            let pgh = pgh - self.sp.cosio * ph;
            (em, xinc, omgadf + pgh, xnode + ph, xll + pl)
        } else {
            // Lyddane modification for low inclination
            let (sinok, cosok) = xnode.sin_cos();
            let mut alfdp = sinis * sinok;
            let mut betdp = sinis * cosok;
            alfdp += ph * cosok + pinc * cosis * sinok;
            betdp += -ph * sinok + pinc * cosis * cosok;
            let xls = xll + omgadf + cosis * xnode + pl + pgh - pinc * xnode * sinis;
            let xnode = wrap_two_pi(alfdp.atan2(betdp));
            let xll = xll + pl;
            let omgadf = xls - xll - xinc.cos() * xnode;
            (em, xinc, omgadf, xnode, xll)
        }
    }
}

/// Inclination, eccentricity and node geometry of the orbit at epoch,
/// shared by both lunisolar coefficient evaluations.
struct OrbitGeometry {
    eq: f64,
    eosq: f64,
    betao: f64,
    betao2: f64,
    sing: f64,
    cosg: f64,
    sinio: f64,
    cosio: f64,
    xqncl: f64,
    xnoi: f64,
}

/// Evaluate the lunisolar secular and long-period coefficient set for one
/// perturbing body, given its orientation on the TLE reference plane.
#[allow(clippy::too_many_arguments)]
fn lunisolar_coefficients(
    g: &OrbitGeometry,
    zcosg: f64,
    zsing: f64,
    zcosi: f64,
    zsini: f64,
    zcosh: f64,
    zsinh: f64,
    cc: f64,
    zn: f64,
    ze: f64,
) -> BodyCoefficients {
    let a1 = zcosg * zcosh + zsing * zcosi * zsinh;
    let a3 = -zsing * zcosh + zcosg * zcosi * zsinh;
    let a7 = -zcosg * zsinh + zsing * zcosi * zcosh;
    let a8 = zsing * zsini;
    let a9 = zsing * zsinh + zcosg * zcosi * zcosh;
    let a10 = zcosg * zsini;
    let a2 = g.cosio * a7 + g.sinio * a8;
    let a4 = g.cosio * a9 + g.sinio * a10;
    let a5 = -g.sinio * a7 + g.cosio * a8;
    let a6 = -g.sinio * a9 + g.cosio * a10;

    let x1 = a1 * g.cosg + a2 * g.sing;
    let x2 = a3 * g.cosg + a4 * g.sing;
    let x3 = -a1 * g.sing + a2 * g.cosg;
    let x4 = -a3 * g.sing + a4 * g.cosg;
    let x5 = a5 * g.sing;
    let x6 = a6 * g.sing;
    let x7 = a5 * g.cosg;
    let x8 = a6 * g.cosg;

    let z31 = 12.0 * x1 * x1 - 3.0 * x3 * x3;
    let z32 = 24.0 * x1 * x2 - 6.0 * x3 * x4;
    let z33 = 12.0 * x2 * x2 - 3.0 * x4 * x4;
    let mut z1 = 3.0 * (a1 * a1 + a2 * a2) + z31 * g.eosq;
    let mut z2 = 6.0 * (a1 * a3 + a2 * a4) + z32 * g.eosq;
    let mut z3 = 3.0 * (a3 * a3 + a4 * a4) + z33 * g.eosq;
    let z11 = -6.0 * a1 * a5 + g.eosq * (-24.0 * x1 * x7 - 6.0 * x3 * x5);
    let z12 = -6.0 * (a1 * a6 + a3 * a5)
        + g.eosq * (-24.0 * (x2 * x7 + x1 * x8) - 6.0 * (x3 * x6 + x4 * x5));
    let z13 = -6.0 * a3 * a6 + g.eosq * (-24.0 * x2 * x8 - 6.0 * x4 * x6);
    let z21 = 6.0 * a2 * a5 + g.eosq * (24.0 * x1 * x5 - 6.0 * x3 * x7);
    let z22 = 6.0 * (a4 * a5 + a2 * a6)
        + g.eosq * (24.0 * (x2 * x5 + x1 * x6) - 6.0 * (x4 * x7 + x3 * x8));
    let z23 = 6.0 * a4 * a6 + g.eosq * (24.0 * x2 * x6 - 6.0 * x4 * x8);
    z1 = z1 + z1 + g.betao2 * z31;
    z2 = z2 + z2 + g.betao2 * z32;
    z3 = z3 + z3 + g.betao2 * z33;

    let s3 = cc * g.xnoi;
    let s2 = -0.5 * s3 / g.betao;
    let s4 = s3 * g.betao;
    let s1 = -15.0 * g.eq * s4;
    let s5 = x1 * x3 + x2 * x4;
    let s6 = x2 * x3 + x1 * x4;
    let s7 = x2 * x4 - x1 * x3;

    let se = s1 * zn * s5;
    let si = s2 * zn * (z11 + z13);
    let sl = -zn * s3 * (z1 + z3 - 14.0 - 6.0 * g.eosq);
    let sgh = s4 * zn * (z31 + z33 - 6.0);
    // Near-equatorial orbits take no node perturbation.
    let sh = if g.xqncl < 5.2359877e-2 {
        0.0
    } else {
        -zn * s2 * (z21 + z23)
    };

    BodyCoefficients {
        se,
        si,
        sl,
        sgh,
        sh,
        e2: 2.0 * s1 * s6,
        e3: 2.0 * s1 * s7,
        xi2: 2.0 * s2 * z12,
        xi3: 2.0 * s2 * (z13 - z11),
        xl2: -2.0 * s3 * z2,
        xl3: -2.0 * s3 * (z3 - z1),
        xl4: -2.0 * s3 * (-21.0 - 9.0 * g.eosq) * ze,
        xgh2: 2.0 * s4 * z32,
        xgh3: 2.0 * s4 * (z33 - z31),
        xgh4: -18.0 * s4 * ze,
        xh2: -2.0 * s2 * z22,
        xh3: -2.0 * s2 * (z23 - z21),
    }
}

/// Deep-space period cutoff: orbits at or above 225 minutes use this model.
pub(crate) fn is_deep_space(period_minutes: f64) -> bool {
    period_minutes >= 225.0
}
