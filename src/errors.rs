//! Error types for orbit prediction operations.

use std::fmt;

/// Errors that can occur while parsing element sets or predicting orbits.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictError {
    /// A TLE line failed its modulo-10 checksum.
    InvalidChecksum {
        /// The offending line number (1 or 2)
        line: usize,
    },

    /// A TLE field could not be parsed or is out of range.
    InvalidFormat {
        /// Description of the unparseable field
        field: String,
    },

    /// The orbit has decayed; no further prediction is possible.
    Decayed,

    /// The satellite can never rise above the observer's horizon
    /// (infeasible latitude or geostationary orbit).
    NotObservable,

    /// An iterative solver failed to converge.
    ConvergenceFailure {
        /// Description of the failing computation
        context: String,
    },
}

impl fmt::Display for PredictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChecksum { line } => {
                write!(f, "TLE line {} failed its checksum", line)
            }
            Self::InvalidFormat { field } => {
                write!(f, "Invalid TLE field: {}", field)
            }
            Self::Decayed => {
                write!(f, "Orbit has decayed")
            }
            Self::NotObservable => {
                write!(f, "Satellite never rises above the observer's horizon")
            }
            Self::ConvergenceFailure { context } => {
                write!(f, "Solver failed to converge: {}", context)
            }
        }
    }
}

impl std::error::Error for PredictError {}

/// Result type for prediction operations.
pub type PredictResult<T> = Result<T, PredictError>;
