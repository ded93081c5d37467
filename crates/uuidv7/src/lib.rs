//! UUID version 7 codec.
//!
//! Packs a 48-bit Unix millisecond timestamp, a 12-bit sub-millisecond
//! fraction and 62 random bits into the RFC 9562 layout, and extracts the
//! timestamp back out as microseconds relative to a configurable epoch
//! (the PostgreSQL epoch by default).
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          unix_ts_ms                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          unix_ts_ms           |  ver  |       fraction        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                         rand                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             rand                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! # Example
//! ```
//! use uuidv7::{uuid_generate_v7, uuid_timestamp_to_v7, uuid_v7_to_timestamp};
//!
//! let id = uuid_generate_v7().unwrap();
//! assert!(id.is_valid());
//!
//! // 2023-11-14 22:13:20 UTC, in microseconds since 2000-01-01
//! let lower = uuid_timestamp_to_v7(753_315_200_000_000, true).unwrap();
//! assert_eq!(uuid_v7_to_timestamp(&lower), 753_315_200_000_000);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod codec;
mod error;
mod generator;
mod id;
mod rand;
mod time;

pub use crate::codec::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::rand::*;
pub use crate::time::*;
