// Estimation errors (no I/O here; see source for fetch failures)

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EstimateError {
    /// All three series were empty, so there is no trailing sample to dismiss.
    #[error("all three metric series are empty")]
    EmptySeries,

    /// No settled point had a finite CPU-per-request value, or no point was retained.
    #[error("insufficient data: {0}")]
    InsufficientData(&'static str),
}

pub type EstimateResult<T> = Result<T, EstimateError>;
