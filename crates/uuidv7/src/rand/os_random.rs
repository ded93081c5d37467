use crate::{Error, RandSource, Result};
use ::rand::{TryRngCore, rngs::OsRng};

/// A `RandSource` backed by the operating system's CSPRNG (`getrandom(2)`,
/// `BCryptGenRandom`, ...).
///
/// Every call is a syscall, and failures are surfaced as
/// [`Error::RandomUnavailable`] instead of panicking.
#[derive(Default, Clone, Copy, Debug)]
pub struct OsRandom;

impl RandSource for OsRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|_| Error::RandomUnavailable)
    }
}
