//! Timestamp (de)serialization helpers
//!
//! - Serialization: `DateTime<Utc>` -> RFC 3339 string
//! - Deserialization, in order: RFC 3339, timezone-less date-time (UTC),
//!   plain date (midnight UTC), Unix timestamp in seconds or milliseconds

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    String(String),
    I64(i64),
    F64(f64),
}

/// Serialize `DateTime<Utc>` as an RFC 3339 string.
pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&dt.to_rfc3339())
}

/// Deserialize a required timestamp.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let raw = RawTimestamp::deserialize(deserializer)?;
    from_raw(raw).map_err(Error::custom)
}

/// Same rules for optional timestamps; `null` and a missing field map to `None`.
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{RawTimestamp, from_raw};

    /// Serialize `Option<DateTime<Utc>>` as an optional RFC 3339 string.
    pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match dt {
            Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an optional timestamp.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        match Option::<RawTimestamp>::deserialize(deserializer)? {
            Some(raw) => from_raw(raw).map(Some).map_err(Error::custom),
            None => Ok(None),
        }
    }
}

fn from_raw(raw: RawTimestamp) -> Result<DateTime<Utc>, String> {
    match raw {
        RawTimestamp::String(s) => parse_timestamp(&s),
        RawTimestamp::I64(ts) => {
            parse_unix_timestamp(ts).ok_or_else(|| format!("Invalid Unix timestamp: {ts}"))
        }
        #[allow(clippy::cast_possible_truncation)]
        RawTimestamp::F64(ts) => parse_unix_timestamp(ts.trunc() as i64)
            .ok_or_else(|| format!("Invalid Unix timestamp: {ts}")),
    }
}

/// Parse a textual timestamp using the accepted formats.
///
/// # Errors
/// Returns a description of the input when no format matches.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    Err(format!("Invalid timestamp: {s}"))
}

/// Unix timestamp, milliseconds when above 10^11, seconds otherwise.
fn parse_unix_timestamp(ts: i64) -> Option<DateTime<Utc>> {
    if ts > 100_000_000_000 {
        DateTime::from_timestamp_millis(ts)
    } else {
        DateTime::from_timestamp(ts, 0)
    }
}
