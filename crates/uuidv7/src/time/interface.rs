use crate::Result;
use core::time::Duration;

/// A trait for wall-clock time sources.
///
/// Implementations return the time elapsed since the Unix epoch with as much
/// sub-millisecond resolution as the platform offers; the nanosecond part
/// feeds the 12-bit precision fraction. A source that cannot be read must
/// return [`Error::ClockUnavailable`].
///
/// # Example
///
/// ```
/// use core::time::Duration;
/// use uuidv7::{Result, TimeSource};
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn now(&self) -> Result<Duration> {
///         Ok(Duration::from_millis(1234))
///     }
/// }
///
/// assert_eq!(FixedTime.now().unwrap().as_millis(), 1234);
/// ```
///
/// [`Error::ClockUnavailable`]: crate::Error::ClockUnavailable
pub trait TimeSource {
    /// Returns the current time as a duration since 1970-01-01 00:00:00 UTC.
    fn now(&self) -> Result<Duration>;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Result<Duration> {
        (**self).now()
    }
}
