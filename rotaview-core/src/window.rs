//! Schedule windows.
//!
//! A window is one time-boxed rotation entry: a map/variant pair that is
//! available between two instants. Every stage of the pipeline (normalize,
//! override, merge, layout) works on plain `Vec<Window>`s.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How authoritative a window is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Confidence {
    /// Published by the game itself (default for schedule data)
    #[default]
    Official,
    /// Reported by players (default for replaced windows)
    Community,
    /// Any other free-form value found in the source documents
    Other(String),
}

impl Confidence {
    pub fn as_str(&self) -> &str {
        match self {
            Confidence::Official => "official",
            Confidence::Community => "community",
            Confidence::Other(value) => value,
        }
    }
}

impl From<String> for Confidence {
    fn from(value: String) -> Self {
        match value.as_str() {
            "official" => Confidence::Official,
            "community" => Confidence::Community,
            _ => Confidence::Other(value),
        }
    }
}

impl From<&str> for Confidence {
    fn from(value: &str) -> Self {
        Confidence::from(value.to_string())
    }
}

impl From<Confidence> for String {
    fn from(value: Confidence) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A map rotation window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub map: String,
    pub variant: String,
    /// Free-form labels, kept in source order for display
    pub tags: Vec<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub confidence: Confidence,
    pub note: Option<String>,
}

impl Window {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Zero-length and inverted windows have no rendered extent.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.start <= now && now < self.end
    }

    /// Whether any part of the window falls inside `[from, to)`.
    pub fn overlaps(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
        self.end > from && self.start < to
    }

    /// Exact `(start, end)` match, the key overrides are applied by.
    pub fn spans(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start == start && self.end == end
    }

    /// Same map and variant
    pub fn same_content(&self, other: &Window) -> bool {
        self.map == other.map && self.variant == other.variant
    }

    /// Human-readable map label (e.g. "Library — Day")
    pub fn label(&self) -> String {
        format!("{} — {}", self.map, self.variant)
    }

    /// Hover text: confidence, tags in parentheses, then the note on its own line.
    pub fn tooltip(&self) -> String {
        let mut text = self.confidence.to_string();
        if !self.tags.is_empty() {
            text.push_str(&format!(" ({})", self.tags.join(", ")));
        }
        if let Some(note) = &self.note {
            text.push('\n');
            text.push_str(note);
        }
        text
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Sort windows ascending by start. Stable, so input order breaks ties.
pub fn sort_by_start(windows: &mut [Window]) {
    windows.sort_by_key(|w| w.start);
}
