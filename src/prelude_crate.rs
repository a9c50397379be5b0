pub(crate) use crate::constants::*;
pub(crate) use crate::error::SolveResult;
pub(crate) use crate::sodium;
