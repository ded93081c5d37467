use core::time::Duration;

/// Unix epoch: Thursday, January 1, 1970 00:00:00 UTC
pub const UNIX_EPOCH: Duration = Duration::from_millis(0);

/// PostgreSQL epoch: Saturday, January 1, 2000 00:00:00 UTC
pub const POSTGRES_EPOCH: Duration = Duration::from_millis(946_684_800_000);

/// Julian day number of 1970-01-01.
pub const UNIX_EPOCH_JDATE: i64 = 2_440_588;

/// Julian day number of 2000-01-01.
pub const POSTGRES_EPOCH_JDATE: i64 = 2_451_545;

pub const USECS_PER_DAY: i64 = 86_400_000_000;

/// Microseconds between the Unix epoch and the PostgreSQL epoch.
pub const EPOCH_DIFF_USECS: i64 = (POSTGRES_EPOCH_JDATE - UNIX_EPOCH_JDATE) * USECS_PER_DAY;

const _: () = assert!(EPOCH_DIFF_USECS == POSTGRES_EPOCH.as_micros() as i64);

/// The origin of the microsecond timestamps a codec accepts and returns.
///
/// Holds the fixed offset, in microseconds, from the Unix epoch to the
/// canonical epoch. It is chosen once, when a generator is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Epoch {
    offset_micros: i64,
}

impl Epoch {
    pub const UNIX: Self = Self::from_offset_micros(0);
    pub const POSTGRES: Self = Self::from_offset_micros(EPOCH_DIFF_USECS);

    /// Builds an epoch `offset_micros` microseconds after the Unix epoch.
    #[must_use]
    pub const fn from_offset_micros(offset_micros: i64) -> Self {
        Self { offset_micros }
    }

    /// Builds an epoch from a [`Duration`] since the Unix epoch.
    ///
    /// Saturates at `i64::MAX` microseconds (roughly 292 000 years).
    #[must_use]
    pub const fn from_duration(since_unix: Duration) -> Self {
        let micros = since_unix.as_micros();
        let offset_micros = if micros > i64::MAX as u128 {
            i64::MAX
        } else {
            micros as i64
        };
        Self::from_offset_micros(offset_micros)
    }

    #[must_use]
    pub const fn offset_micros(self) -> i64 {
        self.offset_micros
    }

    /// Converts a timestamp relative to this epoch into microseconds since
    /// the Unix epoch. Returns `None` on overflow.
    #[must_use]
    pub const fn to_unix_micros(self, ts: i64) -> Option<i64> {
        ts.checked_add(self.offset_micros)
    }

    /// Converts microseconds since the Unix epoch into a timestamp relative
    /// to this epoch. Wraps on overflow, which cannot happen for values
    /// decoded from a 48-bit millisecond field and an epoch after 1970.
    #[must_use]
    pub const fn timestamp_from_unix_micros(self, unix_micros: i64) -> i64 {
        unix_micros.wrapping_sub(self.offset_micros)
    }
}

impl Default for Epoch {
    fn default() -> Self {
        Self::POSTGRES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_diff_matches_calendar() {
        assert_eq!(EPOCH_DIFF_USECS, 946_684_800_000_000);
        assert_eq!(Epoch::POSTGRES.offset_micros(), EPOCH_DIFF_USECS);
        assert_eq!(Epoch::from_duration(POSTGRES_EPOCH), Epoch::POSTGRES);
        assert_eq!(Epoch::from_duration(UNIX_EPOCH), Epoch::UNIX);
        assert_eq!(Epoch::default(), Epoch::POSTGRES);
    }

    #[test]
    fn unix_conversion_round_trips() {
        let ts = 753_315_200_000_000;
        let unix = Epoch::POSTGRES.to_unix_micros(ts).unwrap();
        assert_eq!(unix, 1_700_000_000_000_000);
        assert_eq!(Epoch::POSTGRES.timestamp_from_unix_micros(unix), ts);
    }

    #[test]
    fn to_unix_micros_detects_overflow() {
        assert_eq!(Epoch::POSTGRES.to_unix_micros(i64::MAX), None);
        assert_eq!(Epoch::UNIX.to_unix_micros(i64::MAX), Some(i64::MAX));
    }

    #[test]
    fn from_duration_saturates() {
        let e = Epoch::from_duration(Duration::MAX);
        assert_eq!(e.offset_micros(), i64::MAX);
    }
}
