//! The base schedule document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{lenient, lenient_list};
use crate::error::RotaviewResult;
use crate::window::{Confidence, Window};

/// Base rotation schedule (`rotation.json`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleDocument {
    /// Opaque, passed through to the render model untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,

    /// Maps available around the clock
    #[serde(default, deserialize_with = "lenient_list")]
    pub always_available: Vec<RotationEntry>,

    /// Hourly rotation applied every day of the week
    #[serde(default, deserialize_with = "lenient")]
    pub weekday_rotation: HourlyRotation,

    /// Extra hourly entries applied Friday through Sunday
    #[serde(default, deserialize_with = "lenient")]
    pub weekend_additions: HourlyRotation,
}

impl ScheduleDocument {
    pub fn from_json(content: &str) -> RotaviewResult<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlyRotation {
    #[serde(default, deserialize_with = "lenient_list")]
    pub schedule: Vec<HourlyEntry>,
}

impl HourlyRotation {
    /// Entries scheduled for `hour`, in document order.
    pub fn entries_at(&self, hour: i64) -> impl Iterator<Item = &RotationEntry> {
        self.schedule
            .iter()
            .filter(move |e| e.hour == hour)
            .map(|e| &e.entry)
    }
}

/// A rotation entry tied to an hour of the day (0-23).
///
/// Out-of-range hours are kept but never match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyEntry {
    pub hour: i64,
    #[serde(flatten)]
    pub entry: RotationEntry,
}

/// One map/variant entry as written in the documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationEntry {
    pub map: String,
    pub variant: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl RotationEntry {
    /// Build a window over `[start, end)`, filling in defaults:
    /// no tags, `official` confidence, no note.
    pub fn window(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Window {
        Window {
            map: self.map.clone(),
            variant: self.variant.clone(),
            tags: self.tags.clone().unwrap_or_default(),
            start,
            end,
            confidence: self.confidence.clone().unwrap_or_default(),
            note: self.note.clone().filter(|n| !n.is_empty()),
        }
    }
}
