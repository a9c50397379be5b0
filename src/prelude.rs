pub use crate::cli::Config;
pub use crate::constants::Float;
pub use crate::error::{SolveResult, SolverError};
pub use crate::solver::{solve, Parameters, Solver};
