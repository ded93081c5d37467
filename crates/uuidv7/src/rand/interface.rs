use crate::Result;

/// A trait for cryptographically strong byte sources.
///
/// This abstraction allows you to plug in the OS generator, a user-space
/// CSPRNG, or a mocked source in tests. A source that cannot produce bytes
/// must return [`Error::RandomUnavailable`] rather than a partial fill.
///
/// # Example
/// ```
/// use uuidv7::{RandSource, Result};
///
/// struct FixedRand;
/// impl RandSource for FixedRand {
///     fn fill(&self, dest: &mut [u8]) -> Result<()> {
///         dest.fill(0xab);
///         Ok(())
///     }
/// }
///
/// let mut buf = [0u8; 4];
/// FixedRand.fill(&mut buf).unwrap();
/// assert_eq!(buf, [0xab; 4]);
/// ```
///
/// [`Error::RandomUnavailable`]: crate::Error::RandomUnavailable
pub trait RandSource {
    /// Fills `dest` entirely with random bytes.
    fn fill(&self, dest: &mut [u8]) -> Result<()>;
}

impl<R: RandSource + ?Sized> RandSource for &R {
    fn fill(&self, dest: &mut [u8]) -> Result<()> {
        (**self).fill(dest)
    }
}
