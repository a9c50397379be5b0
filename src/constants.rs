pub type Float = f64;

/// Temperature floor applied at every equation-of-state refresh [K].
pub const T_FLOOR: Float = 200.0;

/// Density floor applied at every equation-of-state refresh [kg/m^3].
pub const RHO_FLOOR: Float = 1e-6;

pub(crate) const OMEGA_FLOOR: Float = 1e-6;

pub(crate) const MU_T_CAP_RATIO: Float = 1000.0;

pub(crate) const PROGRESS_HEADER_EVERY: usize = 100;
