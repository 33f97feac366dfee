//! Input-contract violations reported by the encoder and batch sequencer.

use std::fmt;

/// Error for a numeric argument that violates the input contract.
///
/// Every variant reports a caller mistake detected eagerly, before any encoding
/// work begins; no operation returns partial results alongside one of these and
/// nothing here is retried internally.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Error {
    /// A timestamp argument was negative.
    NegativeTimestamp,
    /// A timestamp argument was NaN or infinite.
    NonFiniteTimestamp,
    /// An interval argument was negative.
    NegativeInterval,
    /// An interval argument was NaN or infinite.
    NonFiniteInterval,
    /// A batch was requested with a count of zero.
    ZeroCount,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeTimestamp => write!(f, "timestamp_ms must be non-negative"),
            Self::NonFiniteTimestamp => write!(f, "timestamp_ms must be a finite number"),
            Self::NegativeInterval => write!(f, "interval_ms must be non-negative"),
            Self::NonFiniteInterval => write!(f, "interval_ms must be a finite number"),
            Self::ZeroCount => write!(f, "count must be a positive integer"),
        }
    }
}

impl std::error::Error for Error {}
