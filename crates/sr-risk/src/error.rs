//! Risk-subsystem error type.

use thiserror::Error;

/// Errors produced by `sr-risk`.
#[derive(Debug, Error)]
pub enum RiskError {
    /// Malformed input (severity outside `[0,1]`, NaN, invalid coordinate,
    /// non-positive cell size).  Raised at build time, never clamped.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RiskResult<T> = Result<T, RiskError>;
