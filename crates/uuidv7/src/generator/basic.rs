#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    codec::{decode_timestamp, encode_now, unix_millis_from_timestamp},
    Epoch, RandSource, Result, TimeSource, UuidV7,
};

/// A stateless UUIDv7 generator.
///
/// Bundles a [`TimeSource`], a [`RandSource`] and the [`Epoch`] that
/// timestamps are expressed in. It keeps no state between calls, so a single
/// instance can be shared across threads whenever its sources allow it.
///
/// ## Features
/// - ✅ Thread-safe (with `Sync` sources)
/// - ✅ Time-ordered across milliseconds, roughly ordered within one via the
///   12-bit sub-millisecond fraction
/// - ❌ No monotonicity guarantee within the same fraction tick
///
/// # Example
/// ```
/// use uuidv7::{Epoch, OsRandom, SystemClock, UuidV7Generator};
///
/// let generator = UuidV7Generator::with_epoch(SystemClock, OsRandom, Epoch::UNIX);
/// let id = generator.generate().unwrap();
/// let ts = generator.decode_timestamp(&id);
/// assert_eq!(ts, id.timestamp_millis() as i64 * 1_000);
/// ```
#[derive(Clone, Debug, Default)]
pub struct UuidV7Generator<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    time: T,
    rng: R,
    epoch: Epoch,
}

impl<T, R> UuidV7Generator<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    /// Creates a generator whose timestamps are microseconds since the
    /// PostgreSQL epoch (2000-01-01 00:00:00 UTC).
    pub const fn new(time: T, rng: R) -> Self {
        Self::with_epoch(time, rng, Epoch::POSTGRES)
    }

    /// Creates a generator whose timestamps are microseconds since `epoch`.
    pub const fn with_epoch(time: T, rng: R, epoch: Epoch) -> Self {
        Self { time, rng, epoch }
    }

    pub const fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Generates a UUID for the current instant with the sub-millisecond
    /// fraction filled in and a random tail.
    ///
    /// # Errors
    /// - [`Error::ClockUnavailable`] if the time source cannot be read
    /// - [`Error::RandomUnavailable`] if the random source fails
    /// - [`Error::TimestampOutOfRange`] if the clock is past year 10889
    ///
    /// [`Error::ClockUnavailable`]: crate::Error::ClockUnavailable
    /// [`Error::RandomUnavailable`]: crate::Error::RandomUnavailable
    /// [`Error::TimestampOutOfRange`]: crate::Error::TimestampOutOfRange
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate(&self) -> Result<UuidV7> {
        let now = self.time.now()?;
        let mut tail = [0u8; 8];
        self.rng.fill(&mut tail)?;
        encode_now(now, tail, self.epoch)
    }

    /// Builds a UUID for `ts`, in microseconds since this generator's epoch,
    /// truncated to the millisecond.
    ///
    /// With `zero_fill`, every bit after the timestamp other than the
    /// version and variant markers is zero, giving the smallest v7 UUID for
    /// that millisecond (useful as an inclusive lower bound in range
    /// queries). Otherwise the 74 free bits are random.
    ///
    /// # Errors
    /// - [`Error::TimestampOutOfRange`] if `ts` is before 1970 or does not fit
    ///   48 bits of milliseconds
    /// - [`Error::RandomUnavailable`] if `zero_fill` is `false` and the random
    ///   source fails
    ///
    /// [`Error::RandomUnavailable`]: crate::Error::RandomUnavailable
    /// [`Error::TimestampOutOfRange`]: crate::Error::TimestampOutOfRange
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn encode_from_timestamp(&self, ts: i64, zero_fill: bool) -> Result<UuidV7> {
        let millis = unix_millis_from_timestamp(ts, self.epoch)?;
        let mut tail = [0u8; 10];
        if !zero_fill {
            self.rng.fill(&mut tail)?;
        }
        Ok(UuidV7::from_timestamp_and_tail(millis, tail))
    }

    /// Returns the embedded timestamp in microseconds since this generator's
    /// epoch. Total over all inputs.
    pub const fn decode_timestamp(&self, uuid: &UuidV7) -> i64 {
        decode_timestamp(uuid, self.epoch)
    }
}
