/// A result type defaulting to the codec's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors the codec can produce.
///
/// Every variant is fatal to the operation that raised it: no partially
/// assembled UUID is ever returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The wall clock could not be read (or reads earlier than 1970).
    ///
    /// Only raised while generating from the current time.
    #[error("could not get CLOCK_REALTIME")]
    ClockUnavailable,

    /// The random source could not supply the requested bytes.
    #[error("could not generate random values")]
    RandomUnavailable,

    /// The timestamp does not fit the 48-bit Unix millisecond field.
    ///
    /// `timestamp` is the rejected input in microseconds relative to the
    /// codec's epoch.
    #[error("timestamp out of range for uuidv7: {timestamp}")]
    TimestampOutOfRange { timestamp: i64 },
}
