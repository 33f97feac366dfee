//! RFC 9562 UUID version 7 generation with deterministic batch sequencing
//!
//! ```rust
//! use uuid7gen::uuid7;
//!
//! let id = uuid7();
//! println!("{}", id); // e.g. "01809424-3e59-7c05-9219-566f82fff672"
//! println!("{:?}", id.as_bytes()); // as 16-byte big-endian array
//! ```
//!
//! # Field and bit layout
//!
//! This implementation produces identifiers with the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          unix_ts_ms                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          unix_ts_ms           |  ver  |        sub_ms         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                           rand                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             rand                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 48-bit `unix_ts_ms` field is dedicated to the Unix timestamp in
//!   milliseconds, truncated to whole milliseconds and masked to 48 bits.
//! - The 4-bit `ver` field is set at `0111`.
//! - The 12-bit `sub_ms` field carries the sub-millisecond fraction of the
//!   timestamp scaled to units of 1/4096 ms when the caller supplies one, and is
//!   filled with random bits otherwise.
//! - The 2-bit `var` field is set at `10`.
//! - The remaining 62 `rand` bits are filled with random data.
//!
//! Because the timestamp and `sub_ms` fields occupy the most significant bits,
//! identifiers encoded at later timestamps sort after earlier ones, bytewise and
//! in the canonical 8-4-4-4-12 hexadecimal text form alike.
//!
//! # Explicit timestamps and batches
//!
//! [`uuid7_at()`] embeds a caller-supplied timestamp, which may carry a
//! sub-millisecond fraction, and [`uuid7_batch()`] produces a sequence of
//! identifiers with deterministic, evenly spaced timestamps:
//!
//! ```rust
//! use uuid7gen::{uuid7_at, uuid7_batch, Batch};
//!
//! let id = uuid7_at(1609459200000i64)?;
//! assert_eq!(id.unix_ts_ms(), 1609459200000);
//!
//! let ids = uuid7_batch(Batch::new(100))?; // 100 IDs spaced 1 ms apart
//! assert_eq!(ids.len(), 100);
//! # Ok::<(), uuid7gen::Error>(())
//! ```
//!
//! The [`Encoder`] type exposes the same operations with a caller-chosen random
//! number generator and [`Clock`], so tests can substitute deterministic fakes
//! for both external collaborators.

mod batch;
mod encoder;
mod error;
mod id;
mod millis;

pub use batch::Batch;
pub use encoder::{Clock, Encoder, SystemClock};
pub use error::Error;
pub use id::{ParseError, Uuid, Variant};
pub use millis::Millis;

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{uuid7, uuid7_at, uuid7_batch};
