//! Process-wide convenience functions.
//!
//! Backed by a shared [`UuidV7Generator`] reading the realtime clock and the
//! OS random source, with timestamps relative to the PostgreSQL epoch.
//!
//! # Example
//! ```rust
//! use uuidv7::{uuid_generate_v7, uuid_v7_to_timestamp};
//!
//! let id = uuid_generate_v7().unwrap();
//! println!("UUIDv7: {id} at {}", uuid_v7_to_timestamp(&id));
//! ```

use crate::{OsRandom, Result, SystemClock, UuidV7, UuidV7Generator};

/// The zero-sized, stateless generator behind the free functions.
static GLOBAL_GENERATOR: UuidV7Generator<SystemClock, OsRandom> =
    UuidV7Generator::new(SystemClock, OsRandom);

/// Generates a UUIDv7 for the current instant.
///
/// # Errors
/// See [`UuidV7Generator::generate`].
pub fn uuid_generate_v7() -> Result<UuidV7> {
    GLOBAL_GENERATOR.generate()
}

/// Extracts the timestamp of `uuid` as microseconds since 2000-01-01.
#[must_use]
pub fn uuid_v7_to_timestamp(uuid: &UuidV7) -> i64 {
    GLOBAL_GENERATOR.decode_timestamp(uuid)
}

/// Builds a UUIDv7 for `ts`, in microseconds since 2000-01-01.
///
/// # Errors
/// See [`UuidV7Generator::encode_from_timestamp`].
pub fn uuid_timestamp_to_v7(ts: i64, zero_fill: bool) -> Result<UuidV7> {
    GLOBAL_GENERATOR.encode_from_timestamp(ts, zero_fill)
}
