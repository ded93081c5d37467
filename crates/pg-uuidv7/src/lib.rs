use pgrx::{prelude::*, Uuid};
use uuidv7::{OsRandom, SystemClock, UuidV7, UuidV7Generator};

pgrx::pg_module_magic!();

/// Timestamps are microseconds since 2000-01-01, matching `timestamp` and
/// `timestamptz`. Reads `CLOCK_REALTIME` and draws from the OS CSPRNG, like
/// `pg_strong_random`.
static GENERATOR: UuidV7Generator<SystemClock, OsRandom> =
    UuidV7Generator::new(SystemClock, OsRandom);

#[inline(always)]
fn to_pg(id: UuidV7) -> Uuid {
    Uuid::from_bytes(id.to_bytes())
}

#[inline(always)]
fn from_pg(uuid: &Uuid) -> UuidV7 {
    UuidV7::from_bytes(*uuid.as_bytes())
}

fn encode_or_error(ts: i64, zero: Option<bool>) -> Uuid {
    GENERATOR
        .encode_from_timestamp(ts, zero.unwrap_or(false))
        .map(to_pg)
        .unwrap_or_else(|e| pgrx::error!("{}", e))
}

// ============================================================================
// GENERATION
// ============================================================================

/// Generate a UUIDv7 for the current time.
///
/// The 12 bits after the version carry the sub-millisecond fraction (~244ns
/// steps), the last 62 bits are random.
#[pg_extern(parallel_safe)]
fn uuid_generate_v7() -> Uuid {
    GENERATOR
        .generate()
        .map(to_pg)
        .unwrap_or_else(|e| pgrx::error!("{}", e))
}

// ============================================================================
// UUID -> TIMESTAMP
// ============================================================================

/// Extract the timestamp of a UUIDv7 (millisecond precision).
///
/// Only the first 48 bits are read; the version is not checked.
#[pg_extern(immutable, parallel_safe, strict)]
fn uuid_v7_to_timestamptz(uuid: Uuid) -> TimestampWithTimeZone {
    let micros = GENERATOR.decode_timestamp(&from_pg(&uuid));
    TimestampWithTimeZone::try_from(micros)
        .unwrap_or_else(|e| pgrx::error!("timestamp out of range: {}", e))
}

/// Extract the timestamp of a UUIDv7 as a UTC `timestamp`.
#[pg_extern(immutable, parallel_safe, strict)]
fn uuid_v7_to_timestamp(uuid: Uuid) -> Timestamp {
    let micros = GENERATOR.decode_timestamp(&from_pg(&uuid));
    Timestamp::try_from(micros).unwrap_or_else(|e| pgrx::error!("timestamp out of range: {}", e))
}

// ============================================================================
// TIMESTAMP -> UUID
// ============================================================================

/// Create a UUIDv7 for a given `timestamptz`, truncated to milliseconds.
///
/// With `zero => true` all bits after the timestamp except the version and
/// variant are zero, yielding the smallest UUIDv7 for that millisecond.
/// A NULL `zero` counts as false.
#[pg_extern(parallel_safe)]
fn uuid_timestamptz_to_v7(
    ts: Option<TimestampWithTimeZone>,
    zero: default!(Option<bool>, false),
) -> Option<Uuid> {
    let micros: i64 = ts?
        .try_into()
        .unwrap_or_else(|e| pgrx::error!("invalid timestamp: {}", e));
    Some(encode_or_error(micros, zero))
}

/// Create a UUIDv7 for a given `timestamp`, read as UTC.
#[pg_extern(parallel_safe)]
fn uuid_timestamp_to_v7(
    ts: Option<Timestamp>,
    zero: default!(Option<bool>, false),
) -> Option<Uuid> {
    let micros: i64 = ts?
        .try_into()
        .unwrap_or_else(|e| pgrx::error!("invalid timestamp: {}", e));
    Some(encode_or_error(micros, zero))
}

// ============================================================================
// UTILITY FUNCTIONS
// ============================================================================

/// Check if a UUID carries the version 7 and RFC 9562 variant markers
#[pg_extern(immutable, parallel_safe, strict)]
fn uuid_v7_is_valid(uuid: Uuid) -> bool {
    from_pg(&uuid).is_valid()
}

extension_sql!(
    r#"
COMMENT ON FUNCTION uuid_generate_v7() IS 'Generate a UUIDv7 for the current time with sub-millisecond precision';
COMMENT ON FUNCTION uuid_v7_to_timestamptz(uuid) IS 'Extract the millisecond timestamp of a UUIDv7 as timestamptz';
COMMENT ON FUNCTION uuid_v7_to_timestamp(uuid) IS 'Extract the millisecond timestamp of a UUIDv7 as a UTC timestamp';
COMMENT ON FUNCTION uuid_timestamptz_to_v7(timestamptz, boolean) IS 'Create a UUIDv7 for a timestamptz; zero => true gives the smallest UUIDv7 for that millisecond';
COMMENT ON FUNCTION uuid_timestamp_to_v7(timestamp, boolean) IS 'Create a UUIDv7 for a UTC timestamp; zero => true gives the smallest UUIDv7 for that millisecond';
COMMENT ON FUNCTION uuid_v7_is_valid(uuid) IS 'Check if a UUID has the version 7 and RFC 9562 variant bits';
"#,
    name = "add_comments",
    requires = [
        uuid_generate_v7,
        uuid_v7_to_timestamptz,
        uuid_v7_to_timestamp,
        uuid_timestamptz_to_v7,
        uuid_timestamp_to_v7,
        uuid_v7_is_valid
    ]
);

// ============================================================================
// TESTS
// ============================================================================

#[cfg(any(test, feature = "pg_test"))]
#[pg_schema]
mod tests {
    use super::*;

    const KNOWN_UUID: &str = "018bcfe5-6800-7000-8000-000000000000";

    fn bytes(uuid: &Uuid) -> [u8; 16] {
        *uuid.as_bytes()
    }

    fn get_uuid(sql: &str) -> Uuid {
        Spi::get_one::<Uuid>(sql).unwrap().unwrap()
    }

    fn get_bool(sql: &str) -> bool {
        Spi::get_one::<bool>(sql).unwrap().unwrap()
    }

    // ========================================================================
    // Generation Tests
    // ========================================================================

    /// Verify generated UUIDs carry version and variant markers
    #[pg_test]
    fn generation_markers() {
        for _ in 0..100 {
            let b = bytes(&uuid_generate_v7());
            assert_eq!(b[6] >> 4, 0x7, "version nibble");
            assert_eq!(b[8] >> 6, 0b10, "variant bits");
        }
    }

    /// Verify generation from SQL
    #[pg_test]
    fn generation_from_sql() {
        let uuid = get_uuid("SELECT uuid_generate_v7()");
        assert!(from_pg(&uuid).is_valid());
        assert!(get_bool(
            "SELECT uuid_v7_to_timestamptz(uuid_generate_v7()) \
             BETWEEN now() - interval '1 minute' AND clock_timestamp() + interval '1 second'"
        ));
    }

    /// Verify random tails differ
    #[pg_test]
    fn generation_distinct() {
        let count = Spi::get_one::<i64>(
            "SELECT COUNT(DISTINCT id) FROM (SELECT uuid_generate_v7() AS id FROM generate_series(1, 10000)) s",
        )
        .unwrap()
        .unwrap();
        assert_eq!(count, 10_000, "Generated UUIDs should be distinct");
    }

    /// Verify UUIDs generated a few milliseconds apart sort by time
    #[pg_test]
    fn generation_ordering() {
        let a = uuid_generate_v7();
        std::thread::sleep(core::time::Duration::from_millis(2));
        let b = uuid_generate_v7();
        assert!(bytes(&a) < bytes(&b));
        assert!(get_bool(&format!("SELECT '{}'::uuid < '{}'::uuid", a, b)));
    }

    // ========================================================================
    // Decode Tests
    // ========================================================================

    /// Verify a known UUID decodes to its timestamptz
    #[pg_test]
    fn decode_known_timestamptz() {
        assert!(get_bool(&format!(
            "SELECT uuid_v7_to_timestamptz('{KNOWN_UUID}') = '2023-11-14 22:13:20+00'::timestamptz"
        )));
    }

    /// Verify a known UUID decodes to its UTC timestamp
    #[pg_test]
    fn decode_known_timestamp() {
        assert!(get_bool(&format!(
            "SELECT uuid_v7_to_timestamp('{KNOWN_UUID}') = '2023-11-14 22:13:20'::timestamp"
        )));
    }

    /// Verify decode ignores everything after the 48-bit timestamp
    #[pg_test]
    fn decode_ignores_tail() {
        assert!(get_bool(
            "SELECT uuid_v7_to_timestamptz('018bcfe5-6800-4fff-ffff-ffffffffffff') \
             = '2023-11-14 22:13:20+00'::timestamptz"
        ));
        assert!(get_bool(
            "SELECT uuid_v7_to_timestamptz('00000000-0000-0000-0000-000000000000') \
             = '1970-01-01 00:00:00+00'::timestamptz"
        ));
    }

    /// Verify decoding does not depend on the session time zone
    #[pg_test]
    fn decode_time_zone_independent() {
        Spi::run("SET TIME ZONE 'America/New_York'").unwrap();
        assert!(get_bool(&format!(
            "SELECT uuid_v7_to_timestamptz('{KNOWN_UUID}') = '2023-11-14 17:13:20-05'::timestamptz"
        )));
        assert!(get_bool(&format!(
            "SELECT uuid_v7_to_timestamp('{KNOWN_UUID}') = '2023-11-14 22:13:20'::timestamp"
        )));
    }

    // ========================================================================
    // Encode Tests
    // ========================================================================

    /// Verify zero fill produces the minimal UUID for the millisecond
    #[pg_test]
    fn encode_zero_fill_known() {
        let text = Spi::get_one::<String>(
            "SELECT uuid_timestamptz_to_v7('2023-11-14 22:13:20.000999+00', true)::text",
        )
        .unwrap()
        .unwrap();
        assert_eq!(text, KNOWN_UUID);

        let text = Spi::get_one::<String>(
            "SELECT uuid_timestamp_to_v7('2023-11-14 22:13:20', zero => true)::text",
        )
        .unwrap()
        .unwrap();
        assert_eq!(text, KNOWN_UUID);
    }

    /// Verify zero fill is deterministic
    #[pg_test]
    fn encode_zero_fill_deterministic() {
        assert!(get_bool(
            "SELECT uuid_timestamptz_to_v7('2024-01-01+00', true) \
             = uuid_timestamptz_to_v7('2024-01-01+00', true)"
        ));
    }

    /// Verify the default (and NULL) zero argument means a random tail
    #[pg_test]
    fn encode_random_by_default() {
        assert!(get_bool(
            "SELECT uuid_timestamptz_to_v7('2024-01-01+00') \
             <> uuid_timestamptz_to_v7('2024-01-01+00')"
        ));
        assert!(get_bool(
            "SELECT uuid_timestamp_to_v7('2024-01-01', NULL) \
             <> uuid_timestamp_to_v7('2024-01-01', NULL)"
        ));
        let uuid = get_uuid("SELECT uuid_timestamptz_to_v7('2024-01-01+00', false)");
        assert!(from_pg(&uuid).is_valid());
        assert!(
            get_bool(&format!(
                "SELECT '{}'::uuid > uuid_timestamptz_to_v7('2024-01-01+00', true)",
                uuid
            )),
            "zero-filled value is the lower bound"
        );
    }

    /// Verify NULL timestamps give NULL
    #[pg_test]
    fn encode_null_timestamp() {
        let uuid = Spi::get_one::<Uuid>("SELECT uuid_timestamptz_to_v7(NULL)").unwrap();
        assert!(uuid.is_none());
        let uuid = Spi::get_one::<Uuid>("SELECT uuid_timestamp_to_v7(NULL, true)").unwrap();
        assert!(uuid.is_none());
    }

    /// Verify round-trip truncates to the millisecond
    #[pg_test]
    fn encode_round_trip_truncates() {
        assert!(get_bool(
            "SELECT uuid_v7_to_timestamptz(uuid_timestamptz_to_v7('2024-01-01 00:00:00.123999+00')) \
             = '2024-01-01 00:00:00.123+00'::timestamptz"
        ));
        assert!(get_bool(
            "SELECT uuid_v7_to_timestamp(uuid_timestamp_to_v7('2024-01-01 00:00:00.123999', true)) \
             = '2024-01-01 00:00:00.123'::timestamp"
        ));
    }

    /// Verify earlier timestamps produce smaller UUIDs
    #[pg_test]
    fn encode_ordering() {
        assert!(get_bool(
            "SELECT uuid_timestamptz_to_v7('2024-01-01+00') < uuid_timestamptz_to_v7('2024-12-31+00', true)"
        ));
    }

    /// Verify instants before 1970 are rejected
    #[pg_test]
    #[should_panic(expected = "timestamp out of range for uuidv7")]
    fn encode_before_unix_epoch() {
        let _ = Spi::get_one::<Uuid>("SELECT uuid_timestamptz_to_v7('1969-12-31 23:59:59+00', true)");
    }

    /// Verify a naive timestamp before 1970 is rejected
    #[pg_test]
    #[should_panic(expected = "timestamp out of range for uuidv7")]
    fn encode_timestamp_before_unix_epoch() {
        let _ = Spi::get_one::<Uuid>("SELECT uuid_timestamp_to_v7('1900-01-01'::timestamp)");
    }

    // ========================================================================
    // Validation Tests
    // ========================================================================

    /// Verify version/variant detection
    #[pg_test]
    fn validation() {
        assert!(get_bool(&format!("SELECT uuid_v7_is_valid('{KNOWN_UUID}')")));
        assert!(!get_bool(
            "SELECT uuid_v7_is_valid('00000000-0000-0000-0000-000000000000')"
        ));
        assert!(!get_bool(
            "SELECT uuid_v7_is_valid('2ca4b2ce-6c13-40d4-bccf-37d222820f6f')"
        ));
        assert!(!get_bool(
            "SELECT uuid_v7_is_valid('018bcfe5-6800-7000-c000-000000000000')"
        ));
    }

    // ========================================================================
    // Range Query Tests
    // ========================================================================

    /// Verify zero-filled bounds select rows by creation time
    #[pg_test]
    fn range_query_by_timestamp() {
        Spi::run("CREATE TEMP TABLE events (id uuid PRIMARY KEY)").unwrap();
        Spi::run(
            "INSERT INTO events VALUES \
             (uuid_timestamptz_to_v7('2024-01-01 10:00:00+00')), \
             (uuid_timestamptz_to_v7('2024-01-01 12:00:00+00')), \
             (uuid_timestamptz_to_v7('2024-01-01 14:00:00+00'))",
        )
        .unwrap();

        let count = Spi::get_one::<i64>(
            "SELECT COUNT(*) FROM events \
             WHERE id >= uuid_timestamptz_to_v7('2024-01-01 10:00:00+00', true) \
             AND id < uuid_timestamptz_to_v7('2024-01-01 14:00:00+00', true)",
        )
        .unwrap()
        .unwrap();
        assert_eq!(count, 2, "Should find events at 10am and 12pm");
    }

    /// Verify a default column keeps insertion order
    #[pg_test]
    fn storage_default_column() {
        Spi::run(
            "CREATE TEMP TABLE items (id uuid PRIMARY KEY DEFAULT uuid_generate_v7(), n int)",
        )
        .unwrap();
        for n in 0..5 {
            Spi::run(&format!("INSERT INTO items (n) VALUES ({n})")).unwrap();
            std::thread::sleep(core::time::Duration::from_millis(2));
        }
        let ordered = get_bool(
            "SELECT array_agg(n ORDER BY id) = array_agg(n ORDER BY n) FROM items",
        );
        assert!(ordered, "ORDER BY id should follow insertion order");
    }
}

#[cfg(test)]
pub mod pg_test {
    pub fn setup(_options: Vec<&str>) {
        // Perform one-off initialization when the pg_test framework starts
    }

    pub fn postgresql_conf_options() -> Vec<&'static str> {
        // Return custom postgresql.conf settings for testing
        vec![]
    }
}
