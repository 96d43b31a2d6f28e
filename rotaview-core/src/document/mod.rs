//! Typed schedule and override documents.
//!
//! Both documents are hand-edited JSON, so parsing is forgiving: optional
//! sections may be missing, and a malformed section or list entry is dropped
//! (with a warning) instead of failing the whole document.

mod overrides;
mod schedule;

pub use overrides::{Override, OverridesDocument, TimeRange, WindowDescriptor, WindowPatch};
pub use schedule::{HourlyEntry, HourlyRotation, RotationEntry, ScheduleDocument};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use crate::error::{RotaviewError, RotaviewResult};

/// Offset-less timestamps are read as UTC.
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parse an ISO 8601 timestamp into a UTC instant.
///
/// Accepts RFC 3339 (any offset), minute precision with an offset
/// (`2025-03-19T14:00+02:00`) and offset-less forms, which are taken as UTC.
pub fn parse_timestamp(s: &str) -> RotaviewResult<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    // "Z" suffix without seconds isn't valid RFC 3339
    let with_offset = s.strip_suffix('Z').map(|rest| format!("{rest}+00:00"));
    let candidate = with_offset.as_deref().unwrap_or(s);
    if let Ok(dt) = DateTime::parse_from_str(candidate, "%Y-%m-%dT%H:%M%:z") {
        return Ok(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| RotaviewError::InvalidTimestamp(s.to_string()))
}

fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_timestamp(&s).map_err(serde::de::Error::custom)
}

fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) => parse_timestamp(&s).map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Deserialize a section, falling back to its default when it is malformed.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }

    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        warn!(error = %e, "ignoring malformed section");
        T::default()
    }))
}

/// Deserialize a list entry by entry, skipping entries that don't parse.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Null => return Ok(Vec::new()),
        other => {
            warn!(found = %json_kind(&other), "expected a list, ignoring section");
            return Ok(Vec::new());
        }
    };

    let entries = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed entry");
                None
            }
        })
        .collect();

    Ok(entries)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
