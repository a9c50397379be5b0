use thiserror::Error;

/// Result alias used across the solver.
pub type SolveResult<T> = Result<T, SolverError>;

#[derive(Error, Debug)]
pub enum SolverError {
    /// A forward-elimination pivot of the Thomas sweep rounded to zero.
    #[error("tridiagonal pivot vanished at row {row}")]
    NumericalBreakdown { row: usize },

    /// A property correlation received an argument outside its domain.
    #[error("invalid property argument: {name} = {value}")]
    InvalidProperty { name: &'static str, value: f64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
