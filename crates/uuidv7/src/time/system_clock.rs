use crate::{Error, Result, TimeSource};
use core::time::Duration;
use std::time::{SystemTime, UNIX_EPOCH};

/// The realtime wall clock (`CLOCK_REALTIME` on Unix).
///
/// Not monotonic: NTP steps and manual adjustments show up in generated IDs,
/// and no rollback compensation is attempted.
#[derive(Default, Clone, Copy, Debug)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> Result<Duration> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| Error::ClockUnavailable)
    }
}
