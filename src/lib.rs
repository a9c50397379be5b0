// ------------------------------------------------------------------------------- MODULES

pub mod cli;
mod constants;
pub mod error;
pub mod prelude;
mod prelude_crate;
pub mod sodium;
pub mod solver;
pub mod tridiagonal;
