//! Default generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync;

use crate::{Batch, Error, Millis, Uuid};
use inner::GlobalGenInner;

/// Returns the lock handle of the process-wide global generator, creating one if
/// none exists.
fn lock_global_gen() -> sync::MutexGuard<'static, GlobalGenInner> {
    static G: sync::OnceLock<sync::Mutex<GlobalGenInner>> = sync::OnceLock::new();
    G.get_or_init(Default::default)
        .lock()
        .expect("uuid7gen: could not lock global generator")
}

/// Generates a UUIDv7 object from the current timestamp.
///
/// This function employs a process-wide global generator. On Unix, the generator
/// is reset when the process ID changes (i.e., upon process forks) to prevent
/// collisions across processes.
///
/// # Examples
///
/// ```rust
/// let id = uuid7gen::uuid7();
/// println!("{}", id); // e.g., "01809424-3e59-7c05-9219-566f82fff672"
/// println!("{:?}", id.as_bytes()); // as 16-byte big-endian array
///
/// let id_string: String = uuid7gen::uuid7().to_string();
/// ```
pub fn uuid7() -> Uuid {
    lock_global_gen().get_mut().now()
}

/// Generates a UUIDv7 object embedding the given timestamp.
///
/// The timestamp may carry a sub-millisecond fraction, which is encoded into the
/// 12 bits right after the version field.
///
/// # Errors
///
/// Returns an error if the timestamp is negative, NaN, or infinite.
///
/// # Examples
///
/// ```rust
/// let id = uuid7gen::uuid7_at(1609459200000i64)?;
/// assert_eq!(id.unix_ts_ms(), 1609459200000);
///
/// let id = uuid7gen::uuid7_at(1609459200000.5f64)?;
/// assert_eq!(id.sub_ms(), 2048);
/// # Ok::<(), uuid7gen::Error>(())
/// ```
pub fn uuid7_at(timestamp_ms: impl Into<Millis>) -> Result<Uuid, Error> {
    lock_global_gen().get_mut().encode(timestamp_ms)
}

/// Generates the batch of UUIDv7 objects described by `batch`, holding the
/// process-wide generator for the duration of the call.
///
/// # Errors
///
/// Returns an error, before any identifier is produced, if the batch request is
/// invalid; see [`Encoder::batch()`](crate::Encoder::batch).
///
/// # Examples
///
/// ```rust
/// use uuid7gen::{uuid7_batch, Batch};
///
/// let ids = uuid7_batch(Batch::new(100))?;
/// assert_eq!(ids.len(), 100);
/// # Ok::<(), uuid7gen::Error>(())
/// ```
pub fn uuid7_batch(batch: Batch) -> Result<Vec<Uuid>, Error> {
    lock_global_gen().get_mut().batch(&batch)
}

mod inner {
    use rand::rngs::adapter::ReseedingRng;
    use rand::rngs::OsRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Core;

    use crate::{Encoder, SystemClock};

    /// The random number generator of the global generator.
    ///
    /// The global generator currently employs [`ChaCha12Core`] with a
    /// [`ReseedingRng`] wrapper to emulate the strategy used by
    /// [`rand::rngs::ThreadRng`].
    pub type GlobalGenRng = ReseedingRng<ChaCha12Core, OsRng>;

    fn new_rng() -> GlobalGenRng {
        const RESEED_THRESHOLD: u64 = 1024 * 64;
        let core =
            ChaCha12Core::from_rng(OsRng).expect("uuid7gen: could not seed global generator");
        ReseedingRng::new(core, RESEED_THRESHOLD, OsRng)
    }

    /// A thin wrapper that resets the state when the process ID changes (i.e.,
    /// upon Unix forks).
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: u32,
        encoder: Encoder<GlobalGenRng, SystemClock>,
    }

    impl Default for GlobalGenInner {
        fn default() -> Self {
            Self {
                #[cfg(unix)]
                pid: std::process::id(),
                encoder: Encoder::new(new_rng()),
            }
        }
    }

    impl GlobalGenInner {
        /// Returns a mutable reference to the inner [`Encoder`] instance,
        /// resetting the state on Unix if the process ID has changed.
        pub fn get_mut(&mut self) -> &mut Encoder<GlobalGenRng, SystemClock> {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                *self = Default::default();
            }
            &mut self.encoder
        }
    }
}
