//! UTC timestamps stored as RFC 3339 text with fixed microsecond precision.
//!
//! Fixed width keeps the text order equal to the chronological order, which
//! the stores rely on when sorting by `created_at`.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Current time, rounded up to the next whole microsecond so it survives a
/// round trip through storage and never precedes the real clock.
pub fn now() -> DateTime<Utc> {
    ceil_micros(Utc::now())
}

fn ceil_micros(ts: DateTime<Utc>) -> DateTime<Utc> {
    match ts.timestamp_subsec_nanos() % 1_000 {
        0 => ts,
        rem => ts + Duration::nanoseconds(i64::from(1_000 - rem)),
    }
}

pub fn format(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(ts))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}
