use crate::{RandSource, Result};
use ::rand::{RngCore, rng};

/// A `RandSource` that uses the thread-local RNG (`rand::rng()`).
///
/// This RNG is fast, cryptographically secure (ChaCha-based), and
/// automatically reseeded from the OS periodically. It never reports
/// failure.
///
/// The underlying `ThreadRng` is neither `Send` nor `Sync`, but this type is
/// a zero-sized handle that looks the generator up on each call, so it may be
/// shared freely across threads.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource for ThreadRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<()> {
        rng().fill_bytes(dest);
        Ok(())
    }
}
