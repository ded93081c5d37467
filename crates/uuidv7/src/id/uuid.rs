use core::fmt;

/// A UUID version 7 value.
///
/// Stored as the 16-byte big-endian wire representation, so the derived
/// ordering is the lexicographic byte ordering, which for v7 values is
/// creation-time ordering at millisecond granularity.
///
/// ```text
///  Byte:    0..=5            6 (hi)   6 (lo) ..= 7    8 (hi)    8 (lo) ..= 15
///          +----------------+--------+---------------+---------+--------------+
///  Field:  | unix_ts_ms(48) | ver(4) | fraction (12) | var (2) | rand (62)    |
///          +----------------+--------+---------------+---------+--------------+
/// ```
///
/// Values are never mutated once built; every constructor returns a fresh
/// copy with the version and variant markers already in place (except
/// [`UuidV7::from_bytes`], which accepts arbitrary input for decoding).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct UuidV7 {
    bytes: [u8; 16],
}

impl UuidV7 {
    /// Width of the Unix millisecond field.
    pub const TIMESTAMP_BITS: u32 = 48;
    /// Width of the sub-millisecond fraction field.
    pub const FRACTION_BITS: u32 = 12;
    /// Version nibble (`0111`).
    pub const VERSION: u8 = 0x7;
    /// Variant bits (`10`).
    pub const VARIANT: u8 = 0b10;

    pub const MAX_TIMESTAMP: u64 = (1 << Self::TIMESTAMP_BITS) - 1;
    pub const MAX_FRACTION: u16 = (1 << Self::FRACTION_BITS) - 1;

    const VERSION_MASK: u8 = 0x0f;
    const VARIANT_MASK: u8 = 0x3f;

    /// The all-zero value. Not a valid v7 UUID.
    pub const NIL: Self = Self { bytes: [0; 16] };

    /// Wraps raw bytes without touching the version or variant bits.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.bytes
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.bytes
    }

    #[must_use]
    pub const fn from_u128(raw: u128) -> Self {
        Self::from_bytes(raw.to_be_bytes())
    }

    #[must_use]
    pub const fn to_u128(self) -> u128 {
        u128::from_be_bytes(self.bytes)
    }

    /// Assembles a UUID from a Unix millisecond timestamp, a 12-bit
    /// sub-millisecond fraction and 8 tail bytes.
    ///
    /// The first 8 bytes become `(unix_ms << 16) | 0x7000 | fraction`; the
    /// top 2 bits of `tail[0]` are replaced by the variant, the other 62 tail
    /// bits are kept verbatim. Bits of `unix_ms` above 48 and of `fraction`
    /// above 12 are discarded.
    #[must_use]
    pub const fn from_fields(unix_ms: u64, fraction: u16, tail: [u8; 8]) -> Self {
        let head = ((unix_ms & Self::MAX_TIMESTAMP) << 16)
            | ((Self::VERSION as u64) << 12)
            | (fraction & Self::MAX_FRACTION) as u64;
        let head = head.to_be_bytes();

        let mut bytes = [0u8; 16];
        let mut i = 0;
        while i < 8 {
            bytes[i] = head[i];
            bytes[i + 8] = tail[i];
            i += 1;
        }
        bytes[8] = (bytes[8] & Self::VARIANT_MASK) | (Self::VARIANT << 6);
        Self { bytes }
    }

    /// Assembles a UUID from a Unix millisecond timestamp and 10 tail bytes
    /// covering bytes 6..=15.
    ///
    /// The high nibble of `tail[0]` is replaced by the version and the top 2
    /// bits of `tail[2]` by the variant; everything else is kept verbatim, so
    /// an all-zero tail yields the smallest v7 UUID for `unix_ms`.
    #[must_use]
    pub const fn from_timestamp_and_tail(unix_ms: u64, tail: [u8; 10]) -> Self {
        let head = ((unix_ms & Self::MAX_TIMESTAMP) << 16).to_be_bytes();

        let mut bytes = [0u8; 16];
        let mut i = 0;
        while i < 6 {
            bytes[i] = head[i];
            i += 1;
        }
        let mut j = 0;
        while j < 10 {
            bytes[j + 6] = tail[j];
            j += 1;
        }
        bytes[6] = (bytes[6] & Self::VERSION_MASK) | (Self::VERSION << 4);
        bytes[8] = (bytes[8] & Self::VARIANT_MASK) | (Self::VARIANT << 6);
        Self { bytes }
    }

    /// Milliseconds since the Unix epoch stored in bytes 0..=5.
    #[must_use]
    pub const fn timestamp_millis(&self) -> u64 {
        let b = &self.bytes;
        u64::from_be_bytes([0, 0, b[0], b[1], b[2], b[3], b[4], b[5]])
    }

    /// The 12 bits following the version nibble.
    #[must_use]
    pub const fn fraction(&self) -> u16 {
        u16::from_be_bytes([self.bytes[6], self.bytes[7]]) & Self::MAX_FRACTION
    }

    #[must_use]
    pub const fn version(&self) -> u8 {
        self.bytes[6] >> 4
    }

    #[must_use]
    pub const fn variant(&self) -> u8 {
        self.bytes[8] >> 6
    }

    /// Returns `true` if both the version and variant markers are set.
    ///
    /// Decoding does not require this; it only reads the timestamp field.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.version() == Self::VERSION && self.variant() == Self::VARIANT
    }

    /// Returns the embedded timestamp as a [`std::time::SystemTime`],
    /// truncated to whole milliseconds.
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    #[cfg(feature = "std")]
    #[must_use]
    pub fn datetime(&self) -> std::time::SystemTime {
        std::time::SystemTime::UNIX_EPOCH
            + core::time::Duration::from_millis(self.timestamp_millis())
    }
}

impl From<[u8; 16]> for UuidV7 {
    fn from(bytes: [u8; 16]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<UuidV7> for [u8; 16] {
    fn from(uuid: UuidV7) -> Self {
        uuid.to_bytes()
    }
}

impl From<u128> for UuidV7 {
    fn from(raw: u128) -> Self {
        Self::from_u128(raw)
    }
}

impl From<UuidV7> for u128 {
    fn from(uuid: UuidV7) -> Self {
        uuid.to_u128()
    }
}

impl fmt::Display for UuidV7 {
    /// Lowercase hyphenated form, e.g. `018e383b-3c80-7000-8000-000000000000`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.bytes.iter().enumerate() {
            if matches!(i, 4 | 6 | 8 | 10) {
                f.write_str("-")?;
            }
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for UuidV7 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UuidV7({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fields_packs_head_big_endian() {
        let id = UuidV7::from_fields(1_700_000_000_000, 0xabc, [0xff; 8]);
        assert_eq!(
            id.as_bytes(),
            &[
                0x01, 0x8b, 0xcf, 0xe5, 0x68, 0x00, 0x7a, 0xbc, 0xbf, 0xff, 0xff, 0xff, 0xff,
                0xff, 0xff, 0xff
            ]
        );
        assert_eq!(id.timestamp_millis(), 1_700_000_000_000);
        assert_eq!(id.fraction(), 0xabc);
        assert!(id.is_valid());
    }

    #[test]
    fn from_fields_keeps_low_tail_bits() {
        let id = UuidV7::from_fields(0, 0, [0x00, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(&id.as_bytes()[8..], &[0x80, 1, 2, 3, 4, 5, 6, 7]);
        let id = UuidV7::from_fields(0, 0, [0x7f; 8]);
        assert_eq!(id.as_bytes()[8], 0xbf);
    }

    #[test]
    fn from_fields_masks_oversized_inputs() {
        let id = UuidV7::from_fields(u64::MAX, u16::MAX, [0; 8]);
        assert_eq!(id.timestamp_millis(), UuidV7::MAX_TIMESTAMP);
        assert_eq!(id.fraction(), UuidV7::MAX_FRACTION);
        assert_eq!(id.version(), UuidV7::VERSION);
    }

    #[test]
    fn from_timestamp_and_tail_preserves_low_nibble() {
        let id = UuidV7::from_timestamp_and_tail(42, [0xff; 10]);
        assert_eq!(id.as_bytes()[6], 0x7f);
        assert_eq!(id.as_bytes()[8], 0xbf);
        assert_eq!(id.timestamp_millis(), 42);

        let zero = UuidV7::from_timestamp_and_tail(42, [0; 10]);
        assert_eq!(
            &zero.as_bytes()[6..],
            &[0x70, 0x00, 0x80, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn timestamp_ignores_trailing_bytes() {
        let a = UuidV7::from_bytes([
            0x01, 0x8e, 0x38, 0x3b, 0x3c, 0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        ]);
        let b = UuidV7::from_bytes([
            0x01, 0x8e, 0x38, 0x3b, 0x3c, 0x80, 0xde, 0xad, 0xbe, 0xef, 1, 2, 3, 4, 5, 6,
        ]);
        assert_eq!(a.timestamp_millis(), b.timestamp_millis());
        assert!(!a.is_valid());
    }

    #[test]
    fn u128_and_bytes_agree() {
        let id = UuidV7::from_fields(1, 2, [3; 8]);
        assert_eq!(UuidV7::from_u128(id.to_u128()), id);
        assert_eq!(UuidV7::from(<[u8; 16]>::from(id)), id);
    }

    #[test]
    fn display_is_hyphenated_lowercase_hex() {
        let id = UuidV7::from_timestamp_and_tail(1_700_000_000_000, [0; 10]);
        assert_eq!(id.to_string(), "018bcfe5-6800-7000-8000-000000000000");
        assert_eq!(
            format!("{id:?}"),
            "UuidV7(018bcfe5-6800-7000-8000-000000000000)"
        );
    }

    #[test]
    fn ordering_follows_bytes() {
        let lo = UuidV7::from_timestamp_and_tail(1, [0xff; 10]);
        let hi = UuidV7::from_timestamp_and_tail(2, [0; 10]);
        assert!(lo < hi);
        assert!(lo.as_bytes() < hi.as_bytes());
    }
}
