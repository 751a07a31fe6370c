//! Serde adapters for event instants.
//!
//! Instants are written as RFC 3339 with millisecond precision
//! (`2025-10-02T10:00:00.000Z`). On input, three shapes are accepted:
//!
//! - RFC 3339 with any offset, normalized to UTC
//! - naive `YYYY-MM-DDTHH:MM:SS[.fff]`, interpreted as UTC
//! - an integer number of Unix milliseconds
//!
//! Use with `#[serde(with = "crate::instant")]`.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};

use crate::error::{Result, SlotError};

/// Parse an instant from its textual form.
pub fn parse(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| SlotError::InvalidInstant(format!("'{}': {}", s, e)))
}

/// Convert Unix milliseconds into an instant.
pub fn from_millis(ms: i64) -> Result<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .ok_or_else(|| SlotError::InvalidInstant(format!("{} ms is out of range", ms)))
}

/// Format an instant the way it is serialized.
pub fn format(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(dt))
}

pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(InstantVisitor)
}

struct InstantVisitor;

impl Visitor<'_> for InstantVisitor {
    type Value = DateTime<Utc>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an RFC 3339 datetime string or Unix milliseconds")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
        parse(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
        from_millis(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
        let ms = i64::try_from(v).map_err(|_| E::custom(format!("{} ms is out of range", v)))?;
        self.visit_i64(ms)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
        // Browsers may hand over `Date.getTime()` through JSON as 1.7e12.
        if v.fract() != 0.0 || !v.is_finite() {
            return Err(E::custom(format!("{} is not a whole millisecond count", v)));
        }
        self.visit_i64(v as i64)
    }
}
