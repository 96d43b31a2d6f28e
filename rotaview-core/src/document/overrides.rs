//! The overrides document: user corrections applied on top of the schedule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{lenient_list, optional_timestamp, timestamp};
use super::schedule::RotationEntry;
use crate::error::RotaviewResult;
use crate::window::{Confidence, Window};

/// Ordered override actions (`overrides.json`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverridesDocument {
    #[serde(default, deserialize_with = "lenient_list")]
    pub overrides: Vec<Override>,
}

impl OverridesDocument {
    pub fn from_json(content: &str) -> RotaviewResult<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

/// A single override action.
///
/// Missing sub-fields are kept as `None` so the action becomes a no-op
/// instead of invalidating the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Override {
    /// Overwrite fields of every window spanning exactly `range`
    Replace {
        #[serde(rename = "where")]
        range: Option<TimeRange>,
        with: Option<WindowPatch>,
    },
    /// Append an explicit window
    Add { window: Option<WindowDescriptor> },
    /// Drop every window spanning exactly `range`
    Remove {
        #[serde(rename = "where")]
        range: Option<TimeRange>,
    },
    /// Any action this version doesn't know about
    #[serde(other)]
    Unknown,
}

/// Exact `(start, end)` key an override is matched by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    #[serde(deserialize_with = "timestamp")]
    pub start: DateTime<Utc>,
    #[serde(deserialize_with = "timestamp")]
    pub end: DateTime<Utc>,
}

/// Replacement fields for `replace`. Absent fields keep the window's value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "optional_timestamp", skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "optional_timestamp", skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
}

impl WindowPatch {
    /// Patch a copy of `window`. Confidence drops to `community` unless the
    /// patch names one explicitly.
    pub fn apply_to(&self, window: &Window) -> Window {
        let mut patched = window.clone();

        if let Some(map) = &self.map {
            patched.map = map.clone();
        }
        if let Some(variant) = &self.variant {
            patched.variant = variant.clone();
        }
        if let Some(tags) = &self.tags {
            patched.tags = tags.clone();
        }
        if let Some(note) = &self.note {
            patched.note = Some(note.clone()).filter(|n| !n.is_empty());
        }
        if let Some(start) = self.start {
            patched.start = start;
        }
        if let Some(end) = self.end {
            patched.end = end;
        }
        patched.confidence = self.confidence.clone().unwrap_or(Confidence::Community);

        patched
    }
}

/// A full window for `add`: a rotation entry plus its explicit time span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowDescriptor {
    #[serde(flatten)]
    pub entry: RotationEntry,
    #[serde(default, deserialize_with = "optional_timestamp", skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "optional_timestamp", skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
}

impl WindowDescriptor {
    /// The described window, or `None` when its span is incomplete.
    pub fn to_window(&self) -> Option<Window> {
        Some(self.entry.window(self.start?, self.end?))
    }
}
