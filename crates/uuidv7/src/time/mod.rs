mod epoch;
mod interface;
#[cfg(feature = "std")]
mod system_clock;

pub use epoch::*;
pub use interface::*;
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[cfg(feature = "std")]
pub use system_clock::*;
