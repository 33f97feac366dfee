//! Millisecond quantities accepted by the encoder and batch sequencer.

use crate::Error;

/// Mask applied to whole-millisecond values before encoding.
pub(crate) const MAX_UINT48: u64 = (1 << 48) - 1;

/// A count of milliseconds that may carry a sub-millisecond fraction.
///
/// Timestamps and batch intervals are accepted as either whole or fractional
/// milliseconds. Integer inputs stay in exact integer arithmetic throughout, so a
/// whole-millisecond timestamp never has a spurious fraction attached to it and
/// keeps the full 74 bits of the entropy region random.
///
/// # Examples
///
/// ```rust
/// use uuid7gen::Millis;
///
/// assert_eq!(Millis::from(42i64), Millis::Int(42));
/// assert_eq!(Millis::from(0.5f64), Millis::Float(0.5));
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Millis {
    /// Whole milliseconds.
    Int(i64),
    /// Milliseconds with a possible sub-millisecond fraction.
    Float(f64),
}

impl From<i64> for Millis {
    fn from(src: i64) -> Self {
        Self::Int(src)
    }
}

impl From<i32> for Millis {
    fn from(src: i32) -> Self {
        Self::Int(src as i64)
    }
}

impl From<u32> for Millis {
    fn from(src: u32) -> Self {
        Self::Int(src as i64)
    }
}

impl From<f64> for Millis {
    fn from(src: f64) -> Self {
        Self::Float(src)
    }
}

impl From<f32> for Millis {
    fn from(src: f32) -> Self {
        Self::Float(src as f64)
    }
}

impl Millis {
    fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Float(v) => v,
        }
    }

    /// Splits a timestamp into the 48-bit whole-millisecond field and the
    /// optional 12-bit sub-millisecond value, validating it on the way.
    ///
    /// Whole milliseconds wrap modulo 2^48. The sub-millisecond value is
    /// `floor(frac * 4096)` clamped to 4095 and is reported only when the
    /// fraction is non-zero; integral inputs leave the 12-bit slot to the random
    /// number generator instead of pinning it to zero.
    pub(crate) fn timestamp_parts(self) -> Result<(u64, Option<u16>), Error> {
        match self {
            Self::Int(v) => {
                if v < 0 {
                    return Err(Error::NegativeTimestamp);
                }
                Ok((v as u64 & MAX_UINT48, None))
            }
            Self::Float(v) => {
                if !v.is_finite() {
                    return Err(Error::NonFiniteTimestamp);
                }
                if v < 0.0 {
                    return Err(Error::NegativeTimestamp);
                }
                let whole = v.floor();
                let frac = v - whole;
                let sub_ms = if frac > 0.0 {
                    Some(((frac * 4096.0) as u16).min(4095))
                } else {
                    None
                };
                Ok(((whole % (MAX_UINT48 + 1) as f64) as u64, sub_ms))
            }
        }
    }

    /// Validates a batch interval: non-negative and finite, zero allowed.
    pub(crate) fn check_interval(self) -> Result<(), Error> {
        match self {
            Self::Int(v) if v < 0 => Err(Error::NegativeInterval),
            Self::Float(v) if !v.is_finite() => Err(Error::NonFiniteInterval),
            Self::Float(v) if v < 0.0 => Err(Error::NegativeInterval),
            _ => Ok(()),
        }
    }

    /// Returns `self + index * interval`.
    ///
    /// Both operands must have passed validation already. The result stays
    /// integral when both operands are, falling back to f64 arithmetic as soon
    /// as either carries a fraction.
    pub(crate) fn offset_by(self, index: u64, interval: Millis) -> Millis {
        match (self, interval) {
            (Self::Int(start), Self::Int(step)) => {
                let ts = start as u128 + index as u128 * step as u128;
                Self::Int((ts & MAX_UINT48 as u128) as i64)
            }
            (start, step) => Self::Float(start.as_f64() + index as f64 * step.as_f64()),
        }
    }
}
