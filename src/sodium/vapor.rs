//! Thermophysical and transport properties of saturated sodium vapor.
//!
//! Thermodynamic properties follow the saturation curve; the conductivity is
//! tabulated over a (T, P) grid. All inputs in kelvin and pascal, outputs in
//! SI units.

use crate::error::{SolveResult, SolverError};
use crate::prelude_crate::*;
use crate::sodium::{interp_table, liquid, lower_index};
use colored::*;

/// Critical temperature [K]
pub const T_CRIT: Float = 2509.46;

/// Molar mass [kg/mol]
pub const MOLAR_MASS: Float = 23e-3;

const HEAT_T_GRID: [Float; 21] = [
    400.0, 500.0, 600.0, 700.0, 800.0, 900.0, 1000.0, 1100.0, 1200.0, 1300.0, 1400.0, 1500.0,
    1600.0, 1700.0, 1800.0, 1900.0, 2000.0, 2100.0, 2200.0, 2300.0, 2400.0,
];

const CP_GRID: [Float; 21] = [
    860.0, 1250.0, 1800.0, 2280.0, 2590.0, 2720.0, 2700.0, 2620.0, 2510.0, 2430.0, 2390.0, 2360.0,
    2340.0, 2410.0, 2460.0, 2530.0, 2660.0, 2910.0, 3400.0, 4470.0, 8030.0,
];

const CV_GRID: [Float; 21] = [
    490.0, 840.0, 1310.0, 1710.0, 1930.0, 1980.0, 1920.0, 1810.0, 1680.0, 1580.0, 1510.0, 1440.0,
    1390.0, 1380.0, 1360.0, 1330.0, 1300.0, 1300.0, 1340.0, 1440.0, 1760.0,
];

// Near-critical values listed past the table end.
const CP_NEAR_CRITICAL: Float = 417_030.0;
const CV_NEAR_CRITICAL: Float = 17_030.0;

const K_T_GRID: [Float; 7] = [900.0, 1000.0, 1100.0, 1200.0, 1300.0, 1400.0, 1500.0];
const K_P_GRID: [Float; 5] = [981.0, 4903.0, 9807.0, 49033.0, 98066.0];

#[rustfmt::skip]
const K_TABLE: [[Float; 5]; 7] = [
    // P = 981,   4903,     9807,     49033,    98066  [Pa]
    [0.035796, 0.0379,   0.0392,   0.0415,   0.0422],   // 900 K
    [0.034053, 0.043583, 0.049627, 0.0511,   0.0520],   // 1000 K
    [0.036029, 0.039399, 0.043002, 0.060900, 0.0620],   // 1100 K
    [0.039051, 0.040445, 0.042189, 0.052881, 0.061133], // 1200 K
    [0.042189, 0.042886, 0.043816, 0.049859, 0.055554], // 1300 K
    [0.045443, 0.045908, 0.046373, 0.049859, 0.054508], // 1400 K
    [0.048930, 0.049162, 0.049511, 0.051603, 0.054043], // 1500 K
];

/// Enthalpy of vaporization [J/kg]
pub fn h_vap(t: Float) -> Float {
    let r = 1.0 - t / T_CRIT;
    (393.37 * r + 4398.6 * r.powf(0.29302)) * 1e3
}

/// Saturation pressure [Pa]
pub fn p_sat(t: Float) -> Float {
    (11.9463 - 12633.7 / t - 0.4672 * t.ln()).exp() * 1e6
}

/// Derivative of the saturation pressure with respect to temperature [Pa/K]
pub fn dp_sat_dt(t: Float) -> Float {
    (12633.73 / (t * t) - 0.4672 / t) * (11.9463 - 12633.73 / t - 0.4672 * t.ln()).exp() * 1e6
}

/// Density of saturated vapor [kg/m^3], Clausius-Clapeyron form
pub fn rho_sat(t: Float) -> Float {
    let denom = h_vap(t) / (t * dp_sat_dt(t)) + 1.0 / liquid::rho(t);
    1.0 / denom
}

/// Specific heat at constant pressure [J/(kg*K)]
pub fn cp(t: Float) -> Float {
    if t >= 2500.0 {
        return CP_NEAR_CRITICAL;
    }
    interp_table(&HEAT_T_GRID, &CP_GRID, t)
}

/// Specific heat at constant volume [J/(kg*K)]
pub fn cv(t: Float) -> Float {
    if t >= 2500.0 {
        return CV_NEAR_CRITICAL;
    }
    interp_table(&HEAT_T_GRID, &CV_GRID, t)
}

/// Dynamic viscosity [Pa*s]
pub fn mu(t: Float) -> Float {
    6.083e-9 * t + 1.2606e-5
}

/// Thermal conductivity [W/(m*K)].
///
/// Bilinear interpolation inside the experimental (T, P) grid. Outside
/// 900-1500 K or 981-98066 Pa the value is extrapolated with kinetic-gas
/// sqrt(T) scaling referenced to the nearest grid boundary (constant-P
/// approximation for pressure excursions), and a warning is printed.
pub fn k(t: Float, p: Float) -> Float {
    let (t_min, t_max) = (K_T_GRID[0], K_T_GRID[K_T_GRID.len() - 1]);
    let (p_min, p_max) = (K_P_GRID[0], K_P_GRID[K_P_GRID.len() - 1]);

    let t_c = t.clamp(t_min, t_max);
    let p_c = p.clamp(p_min, p_max);

    let i_t = lower_index(&K_T_GRID, t_c);
    let i_p = lower_index(&K_P_GRID, p_c);

    let (t0, t1) = (K_T_GRID[i_t], K_T_GRID[i_t + 1]);
    let (p0, p1) = (K_P_GRID[i_p], K_P_GRID[i_p + 1]);

    let q11 = K_TABLE[i_t][i_p];
    let q21 = K_TABLE[i_t + 1][i_p];
    let q12 = K_TABLE[i_t][i_p + 1];
    let q22 = K_TABLE[i_t + 1][i_p + 1];

    let s = (t_c - t0) / (t1 - t0);
    let w = (p_c - p0) / (p1 - p0);
    let k_interp =
        (1.0 - s) * (1.0 - w) * q11 + s * (1.0 - w) * q21 + (1.0 - s) * w * q12 + s * w * q22;

    if t < t_min || t > t_max {
        warn(&format!(
            "vapor k(): T = {t} K outside [{t_min}, {t_max}] K, using sqrt(T) extrapolation"
        ));
    }
    if p < p_min || p > p_max {
        warn(&format!(
            "vapor k(): P = {p} Pa outside [{p_min}, {p_max}] Pa, using constant-P approximation"
        ));
    }
    if t < t_min || t > t_max || p < p_min || p > p_max {
        // t_c is the nearest boundary in T; for pure pressure excursions the
        // ratio is one and the interpolated value passes through unchanged.
        return k_interp * (t / t_c).sqrt();
    }

    k_interp
}

/// Friction factor [-], Gnielinski correlation
pub fn f(re: Float) -> SolveResult<Float> {
    if re <= 0.0 {
        return Err(SolverError::InvalidProperty {
            name: "Re",
            value: re,
        });
    }
    let t = 0.79 * re.ln() - 1.64;
    Ok(1.0 / (t * t))
}

/// Nusselt number [-], Gnielinski correlation; constant 4.36 in the laminar range
pub fn nu(re: Float, pr: Float) -> SolveResult<Float> {
    if re <= 0.0 {
        return Err(SolverError::InvalidProperty {
            name: "Re",
            value: re,
        });
    }
    if pr <= 0.0 {
        return Err(SolverError::InvalidProperty {
            name: "Pr",
            value: pr,
        });
    }
    if re < 1000.0 {
        return Ok(4.36);
    }
    let fp8 = f(re)? / 8.0;
    let num = fp8 * (re - 1000.0) * pr;
    let den = 1.0 + 12.7 * fp8.sqrt() * (pr.powf(2.0 / 3.0) - 1.0);
    Ok(num / den)
}

/// Convective heat transfer coefficient [W/(m^2*K)]
pub fn h_conv(re: Float, pr: Float, k: Float, d_h: Float) -> SolveResult<Float> {
    if k <= 0.0 {
        return Err(SolverError::InvalidProperty { name: "k", value: k });
    }
    if d_h <= 0.0 {
        return Err(SolverError::InvalidProperty {
            name: "Dh",
            value: d_h,
        });
    }
    Ok(nu(re, pr)? * k / d_h)
}

fn warn(message: &str) {
    eprintln!("{} {message}", "warning:".yellow().bold());
}
