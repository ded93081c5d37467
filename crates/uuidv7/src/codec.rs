//! The bit-level encode and decode steps shared by every generator.
//!
//! These functions are pure: the caller supplies the clock reading and the
//! random bytes, which keeps them `no_std` and deterministic under test.

use crate::{Epoch, Error, Result, UuidV7};
use core::time::Duration;

const NANOS_PER_MILLI: u64 = 1_000_000;
const MICROS_PER_MILLI: i64 = 1_000;

/// Scales the nanoseconds within the current millisecond into the 12-bit
/// fraction `0..=4095`.
///
/// Equals `((nanos % 1_000_000) * 4096) / 1_000_000` for every
/// `nanos` in `0..=999_999_999`; the shift-and-mask form avoids the modulo.
#[must_use]
pub const fn fraction_from_nanos(nanos: u32) -> u16 {
    ((((nanos as u64) << UuidV7::FRACTION_BITS) / NANOS_PER_MILLI) & UuidV7::MAX_FRACTION as u64)
        as u16
}

/// Builds a UUID stamped with `since_unix`, with the sub-millisecond fraction
/// set and the 62 low bits taken from `tail`.
///
/// # Errors
/// - [`Error::TimestampOutOfRange`] if `since_unix` does not fit 48 bits of
///   milliseconds.
pub fn encode_now(since_unix: Duration, tail: [u8; 8], epoch: Epoch) -> Result<UuidV7> {
    let secs = since_unix.as_secs();
    let nanos = since_unix.subsec_nanos();
    let out_of_range = || Error::TimestampOutOfRange {
        timestamp: i64::try_from(since_unix.as_micros())
            .map_or(i64::MAX, |us| epoch.timestamp_from_unix_micros(us)),
    };
    let millis = secs
        .checked_mul(1_000)
        .and_then(|ms| ms.checked_add(u64::from(nanos) / NANOS_PER_MILLI))
        .filter(|&ms| ms <= UuidV7::MAX_TIMESTAMP)
        .ok_or_else(out_of_range)?;

    Ok(UuidV7::from_fields(millis, fraction_from_nanos(nanos), tail))
}

/// Converts a timestamp relative to `epoch` into the 48-bit Unix
/// millisecond field, truncating sub-millisecond precision.
///
/// # Errors
/// - [`Error::TimestampOutOfRange`] if the instant is before 1970 or past
///   the 48-bit millisecond limit (year 10889).
pub fn unix_millis_from_timestamp(ts: i64, epoch: Epoch) -> Result<u64> {
    let out_of_range = Error::TimestampOutOfRange { timestamp: ts };
    let unix_micros = epoch
        .to_unix_micros(ts)
        .filter(|&us| us >= 0)
        .ok_or(out_of_range)?;
    let millis = (unix_micros / MICROS_PER_MILLI) as u64;
    if millis > UuidV7::MAX_TIMESTAMP {
        return Err(out_of_range);
    }
    Ok(millis)
}

/// Builds a UUID for the timestamp `ts` (microseconds since `epoch`) with
/// bytes 6..=15 taken from `tail` before the markers are applied.
///
/// An all-zero `tail` produces the smallest v7 UUID carrying that
/// millisecond.
///
/// # Errors
/// - [`Error::TimestampOutOfRange`] as for [`unix_millis_from_timestamp`].
pub fn encode_timestamp(ts: i64, tail: [u8; 10], epoch: Epoch) -> Result<UuidV7> {
    let millis = unix_millis_from_timestamp(ts, epoch)?;
    Ok(UuidV7::from_timestamp_and_tail(millis, tail))
}

/// Extracts the timestamp as microseconds since `epoch`.
///
/// Only bytes 0..=5 are read; version, variant and tail are ignored, so
/// any 16-byte value decodes.
#[must_use]
pub const fn decode_timestamp(uuid: &UuidV7, epoch: Epoch) -> i64 {
    // At most 2^48 * 1000 < 2^58, always fits.
    let unix_micros = uuid.timestamp_millis() as i64 * MICROS_PER_MILLI;
    epoch.timestamp_from_unix_micros(unix_micros)
}
