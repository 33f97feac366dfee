//! UUIDv7 encoder and its injectable clock seam.

use rand::RngCore;

use crate::millis::MAX_UINT48;
use crate::{Batch, Error, Millis, Uuid};

/// A source of the current Unix time in milliseconds.
///
/// The encoder treats the clock as a pure input and does not manage it.
/// Implement this trait to substitute a deterministic clock in tests.
pub trait Clock {
    /// Returns the current Unix timestamp in milliseconds.
    fn unix_ts_ms(&mut self) -> u64;
}

/// The wall-clock-backed [`Clock`] used by default.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_ts_ms(&mut self) -> u64 {
        use std::time;
        time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .expect("clock may have gone backwards")
            .as_millis() as u64
    }
}

/// Encodes UUIDv7 objects from explicit or current timestamps.
///
/// The encoder owns its random number generator and clock but keeps no other
/// state: every identifier is computed from its timestamp alone, so calls are
/// independent and a batch may be split across encoders freely. Identifiers
/// encoded at strictly increasing timestamps (by a whole millisecond, or by a
/// fraction large enough to change the encoded sub-millisecond value) compare
/// as strictly increasing, bytewise and in canonical text form alike.
/// Identifiers sharing a timestamp are ordered only by their random bits.
///
/// # Examples
///
/// ```rust
/// use rand::rngs::OsRng;
/// use uuid7gen::Encoder;
///
/// let mut enc = Encoder::new(OsRng);
/// println!("{}", enc.now());
///
/// let id = enc.encode(1609459200000i64)?;
/// assert_eq!(id.unix_ts_ms(), 1609459200000);
/// # Ok::<(), uuid7gen::Error>(())
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Encoder<R, C> {
    /// The random number generator used by the encoder.
    rng: R,
    clock: C,
}

impl<R: RngCore> Encoder<R, SystemClock> {
    /// Creates an encoder backed by the system clock.
    pub const fn new(rng: R) -> Self {
        Self {
            rng,
            clock: SystemClock,
        }
    }
}

impl<R: RngCore, C: Clock> Encoder<R, C> {
    /// Creates an encoder with a caller-supplied clock.
    pub const fn with_clock(rng: R, clock: C) -> Self {
        Self { rng, clock }
    }

    /// Generates a UUIDv7 object from the current timestamp.
    pub fn now(&mut self) -> Uuid {
        let unix_ts_ms = self.clock.unix_ts_ms();
        self.encode_parts(unix_ts_ms & MAX_UINT48, None)
    }

    /// Encodes a UUIDv7 object embedding the given timestamp.
    ///
    /// The timestamp is truncated to whole milliseconds and masked to 48 bits,
    /// so values at or beyond 2^48 ms silently wrap. A fractional timestamp
    /// additionally stores `floor(frac * 4096)` in the 12 bits right after the
    /// version field; a whole-millisecond timestamp leaves those bits random.
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamp is negative, NaN, or infinite.
    pub fn encode(&mut self, timestamp_ms: impl Into<Millis>) -> Result<Uuid, Error> {
        let (unix_ts_ms, sub_ms) = timestamp_ms.into().timestamp_parts()?;
        Ok(self.encode_parts(unix_ts_ms, sub_ms))
    }

    /// Generates the batch of UUIDv7 objects described by `batch`, assigning the
    /// i-th identifier the timestamp `start + i * interval`.
    ///
    /// When the batch has no explicit start, the clock is read once before any
    /// element is generated and shared by the whole batch. Timestamps are
    /// non-decreasing across the result, strictly increasing whenever the
    /// interval is positive.
    ///
    /// # Errors
    ///
    /// Returns an error, before any identifier is produced, if the count is
    /// zero, the start timestamp is negative or not finite, or the interval is
    /// negative or not finite.
    pub fn batch(&mut self, batch: &Batch) -> Result<Vec<Uuid>, Error> {
        batch.check()?;
        let start = match batch.start() {
            Some(start) => start,
            None => Millis::Int(self.clock.unix_ts_ms() as i64),
        };
        (0..batch.count() as u64)
            .map(|i| {
                let (unix_ts_ms, sub_ms) = start.offset_by(i, batch.interval()).timestamp_parts()?;
                Ok(self.encode_parts(unix_ts_ms, sub_ms))
            })
            .collect()
    }

    /// Assembles the 16-byte value from a masked timestamp and an optional
    /// 12-bit sub-millisecond value.
    fn encode_parts(&mut self, unix_ts_ms: u64, sub_ms: Option<u16>) -> Uuid {
        debug_assert!(unix_ts_ms <= MAX_UINT48);

        let mut bytes = [0u8; 16];
        bytes[..6].copy_from_slice(&unix_ts_ms.to_be_bytes()[2..]);
        self.rng.fill_bytes(&mut bytes[6..]);
        if let Some(sub_ms) = sub_ms {
            debug_assert!(sub_ms < 1 << 12);
            bytes[6] = (bytes[6] & 0xf0) | (sub_ms >> 8) as u8;
            bytes[7] = sub_ms as u8;
        }
        bytes[6] = 0x70 | (bytes[6] & 0x0f);
        bytes[8] = 0x80 | (bytes[8] & 0x3f);
        Uuid::from(bytes)
    }
}

/// Supports operations as an infinite iterator that produces a new UUIDv7 object
/// from the current timestamp for each call of `next()`.
///
/// # Examples
///
/// ```rust
/// use uuid7gen::Encoder;
///
/// Encoder::new(rand::thread_rng())
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{}] {}", i, e));
/// ```
impl<R: RngCore, C: Clock> Iterator for Encoder<R, C> {
    type Item = Uuid;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.now())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<R: RngCore, C: Clock> std::iter::FusedIterator for Encoder<R, C> {}
