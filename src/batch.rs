//! Batch generation requests.

use crate::{Error, Millis};

/// Describes a batch of UUIDv7 objects with deterministic, evenly spaced
/// timestamps.
///
/// The i-th identifier of the batch receives the timestamp
/// `start + i * interval_ms`. The interval defaults to 1 ms and may be
/// fractional or zero; a zero interval yields identical timestamps that differ
/// only in their random bits. When no start is given, the current time is
/// resolved once when generation begins and shared by the whole batch.
///
/// # Examples
///
/// ```rust
/// use uuid7gen::{uuid7_batch, Batch};
///
/// let ids = uuid7_batch(Batch::new(3).starting_at(1609459200000i64).interval_ms(10i64))?;
/// assert_eq!(ids[0].unix_ts_ms() + 10, ids[1].unix_ts_ms());
/// assert_eq!(ids[1].unix_ts_ms() + 10, ids[2].unix_ts_ms());
/// # Ok::<(), uuid7gen::Error>(())
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Batch {
    count: usize,
    start: Option<Millis>,
    interval: Millis,
}

impl Batch {
    /// Creates a request for `count` identifiers spaced 1 ms apart, starting at
    /// the time of generation.
    pub const fn new(count: usize) -> Self {
        Self {
            count,
            start: None,
            interval: Millis::Int(1),
        }
    }

    /// Sets the timestamp of the first identifier.
    pub fn starting_at(mut self, timestamp_ms: impl Into<Millis>) -> Self {
        self.start = Some(timestamp_ms.into());
        self
    }

    /// Sets the spacing between consecutive timestamps in milliseconds.
    pub fn interval_ms(mut self, interval_ms: impl Into<Millis>) -> Self {
        self.interval = interval_ms.into();
        self
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }

    pub(crate) fn start(&self) -> Option<Millis> {
        self.start
    }

    pub(crate) fn interval(&self) -> Millis {
        self.interval
    }

    /// Validates the whole request before any identifier is produced.
    pub(crate) fn check(&self) -> Result<(), Error> {
        if self.count == 0 {
            return Err(Error::ZeroCount);
        }
        self.interval.check_interval()?;
        if let Some(start) = self.start {
            start.timestamp_parts()?;
            // the far end of the span must be encodable too
            start
                .offset_by(self.count as u64 - 1, self.interval)
                .timestamp_parts()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Batch;
    use crate::encoder::tests::{FillRng, StepClock};
    use crate::{Encoder, Error, SystemClock, Uuid};
    use rand::rngs::ThreadRng;

    fn encoder() -> Encoder<ThreadRng, SystemClock> {
        Encoder::new(rand::thread_rng())
    }

    /// Generates the requested count with correct constant bits
    #[test]
    fn generates_the_requested_count_with_correct_constant_bits() {
        let ids = encoder().batch(&Batch::new(10)).unwrap();
        assert_eq!(ids.len(), 10);
        for e in ids {
            assert_eq!(e.version(), Some(7));
        }
    }

    /// Rejects invalid requests before generating anything
    #[test]
    fn rejects_invalid_requests_before_generating_anything() {
        let mut enc = encoder();
        assert_eq!(enc.batch(&Batch::new(0)), Err(Error::ZeroCount));
        assert_eq!(
            enc.batch(&Batch::new(5).interval_ms(-1i64)),
            Err(Error::NegativeInterval)
        );
        assert_eq!(
            enc.batch(&Batch::new(5).interval_ms(f64::NAN)),
            Err(Error::NonFiniteInterval)
        );
        assert_eq!(
            enc.batch(&Batch::new(5).starting_at(-1i64)),
            Err(Error::NegativeTimestamp)
        );
        assert_eq!(
            enc.batch(&Batch::new(5).starting_at(f64::NAN)),
            Err(Error::NonFiniteTimestamp)
        );
    }

    /// Orders canonical strings strictly under a positive interval
    #[test]
    fn orders_canonical_strings_strictly_under_a_positive_interval() {
        let ids = encoder()
            .batch(&Batch::new(100).starting_at(1609459200000i64))
            .unwrap();
        for w in ids.windows(2) {
            assert!(w[0] < w[1]);
            assert!(w[0].to_string() < w[1].to_string());
        }
    }

    /// Spaces timestamps by the given interval
    #[test]
    fn spaces_timestamps_by_the_given_interval() {
        let ids = encoder()
            .batch(&Batch::new(5).starting_at(1609459200000i64).interval_ms(10i64))
            .unwrap();
        assert_eq!(ids[0].unix_ts_ms(), 1609459200000);
        for (i, e) in ids.iter().enumerate() {
            assert_eq!(e.unix_ts_ms(), 1609459200000 + 10 * i as u64);
        }
    }

    /// Matches the timestamps of individually encoded identifiers
    #[test]
    fn matches_the_timestamps_of_individually_encoded_identifiers() {
        let start = 1609459200000i64;
        let mut enc = encoder();
        let batch = enc
            .batch(&Batch::new(5).starting_at(start).interval_ms(3i64))
            .unwrap();
        for (i, e) in batch.iter().enumerate() {
            let single = enc.encode(start + 3 * i as i64).unwrap();
            assert_eq!(e.unix_ts_ms(), single.unix_ts_ms());
        }
    }

    /// Allows a zero interval producing identical timestamps
    #[test]
    fn allows_a_zero_interval_producing_identical_timestamps() {
        use std::collections::HashSet;
        let ids = encoder()
            .batch(&Batch::new(50).starting_at(1609459200000i64).interval_ms(0i64))
            .unwrap();
        assert!(ids.iter().all(|e| e.unix_ts_ms() == 1609459200000));
        let s: HashSet<&Uuid> = ids.iter().collect();
        assert_eq!(s.len(), 50);
    }

    /// Encodes fractional intervals into the sub-millisecond field
    #[test]
    fn encodes_fractional_intervals_into_the_sub_millisecond_field() {
        let mut enc = Encoder::new(FillRng(0x00));
        let ids = enc
            .batch(&Batch::new(3).starting_at(1609459200000i64).interval_ms(0.5f64))
            .unwrap();
        assert_eq!(ids.len(), 3);
        assert_eq!(ids[1].unix_ts_ms(), 1609459200000);
        assert_eq!(ids[1].sub_ms(), 2048);
        assert_eq!(ids[2].unix_ts_ms(), 1609459200001);
        for e in ids {
            assert_eq!(e.version(), Some(7));
        }
    }

    /// Resolves the start time once per batch
    #[test]
    fn resolves_the_start_time_once_per_batch() {
        let ts = 0x0123_4567_89abu64;
        let mut enc = Encoder::with_clock(rand::thread_rng(), StepClock { now: ts, step: 1000 });
        let ids = enc.batch(&Batch::new(5)).unwrap();
        for (i, e) in ids.iter().enumerate() {
            assert_eq!(e.unix_ts_ms(), ts + i as u64);
        }
    }

    /// Generates 1000 distinct identifiers in one call
    #[test]
    fn generates_1000_distinct_identifiers_in_one_call() {
        use std::collections::HashSet;
        let ids = encoder().batch(&Batch::new(1000)).unwrap();
        assert_eq!(ids.len(), 1000);
        let s: HashSet<&Uuid> = ids.iter().collect();
        assert_eq!(s.len(), 1000);
    }
}
