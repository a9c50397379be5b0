//! Thermophysical properties of liquid sodium.
//!
//! All functions accept temperature T in kelvin and return SI units.

use crate::prelude_crate::*;

/// Critical temperature [K]
pub const T_CRIT: Float = 2509.46;

/// Density [kg/m^3]
pub fn rho(t: Float) -> Float {
    let r = 1.0 - t / T_CRIT;
    219.0 + 275.32 * r + 511.58 * r.sqrt()
}

/// Thermal conductivity [W/(m*K)]
pub fn k(t: Float) -> Float {
    124.67 - 0.11381 * t + 5.5226e-5 * t * t - 1.1842e-8 * t * t * t
}

/// Specific heat [J/(kg*K)]
pub fn cp(t: Float) -> Float {
    let dt = t - 273.15;
    1436.72 - 0.58 * dt + 4.627e-4 * dt * dt
}

/// Dynamic viscosity [Pa*s], Shpilrain correlation, valid for 371 K < T < 2500 K
pub fn mu(t: Float) -> Float {
    (-6.4406 - 0.3958 * t.ln() + 556.835 / t).exp()
}
