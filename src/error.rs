//! Errors reported while building stabilizer chains.
use thiserror::Error;

use crate::El;

/// Failures of [`Bsgs`](crate::bsgs::Bsgs) construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The solvable group construction found no polycyclic refinement.
    ///
    /// Either the generators do not generate a solvable group or the derived length exceeds the
    /// bound for solvable subgroups of the symmetric group of this degree.
    #[error("failed to solve BSGS: generators do not generate a solvable group")]
    Solve,
    /// A generator moves a point outside of the declared degree.
    #[error("generator moves point {point} but the degree is {degree}")]
    PointOutOfRange { point: El, degree: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
