//! Timeline layout: columns, geometry and per-hour segments.
//!
//! Windows overlapping the day are sorted (start ascending, longer first on
//! ties), packed greedily into columns so that a column never holds two
//! overlapping windows, then sliced at hour boundaries. Each slice carries
//! its own past/current/future phase so a renderer can style elapsed hours
//! of a long window independently.

mod columns;
mod segments;

pub use columns::{Columns, assign_columns};
pub use segments::{SegmentPhase, hour_slices};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::debug;

use crate::config::LayoutConfig;
use crate::day::{ScheduleDay, hours};
use crate::window::{Confidence, Window};

/// One drawable piece of a window, at most an hour long.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub map: String,
    pub variant: String,
    /// Map label, only on segments that should show one
    pub label: Option<String>,
    pub tooltip: String,
    pub confidence: Confidence,
    pub tags: Vec<String>,
    pub note: Option<String>,
    pub column: usize,
    /// Span of the whole window this segment belongs to
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    /// Clipped span of this segment
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub phase: SegmentPhase,
    /// Vertical offset from the top of the day, in pixels
    pub top: f64,
    pub height: f64,
    /// Horizontal offset and width, in percent of the timeline width
    pub left: f64,
    pub width: f64,
}

/// Laid-out windows for a day.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Timeline {
    pub segments: Vec<Segment>,
    pub column_count: usize,
    /// The windows that were laid out, in layout order
    pub windows: Vec<Window>,
}

/// Lay out the windows overlapping `day` relative to `now`.
///
/// Windows entirely in the past or future of the day are still laid out.
/// Zero-length and inverted windows are skipped.
pub fn layout(
    windows: &[Window],
    day: &ScheduleDay,
    now: DateTime<Utc>,
    config: &LayoutConfig,
) -> Timeline {
    let mut todays: Vec<Window> = windows
        .iter()
        .filter(|w| !w.is_empty() && w.overlaps(day.start(), day.end()))
        .cloned()
        .collect();

    // Longer windows first on ties so they take the leftmost columns
    todays.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| b.duration().cmp(&a.duration())));

    let (assigned, column_count) = assign_columns(&todays);

    let mut segments = Vec::new();
    for (window, column) in todays.iter().zip(assigned) {
        segments.extend(window_segments(window, column, day, now, config));
    }

    debug!(
        windows = todays.len(),
        columns = column_count,
        segments = segments.len(),
        "laid out timeline"
    );

    Timeline {
        segments,
        column_count,
        windows: todays,
    }
}

fn window_segments(
    window: &Window,
    column: usize,
    day: &ScheduleDay,
    now: DateTime<Utc>,
    config: &LayoutConfig,
) -> Vec<Segment> {
    let is_long = window.duration() >= Duration::hours(config.long_window_hours);
    let label_interval = config.label_interval_hours.max(1) as i64;
    let first_hour = day.hour_index(window.start);

    hour_slices(window, day)
        .into_iter()
        .map(|(start, end)| {
            // Counted from the window's first hour, even when slicing starts later
            let index = day.hour_index(start) - first_hour;
            let labelled = index == 0 || (is_long && index % label_interval == 0);

            Segment {
                map: window.map.clone(),
                variant: window.variant.clone(),
                label: labelled.then(|| window.label()),
                tooltip: window.tooltip(),
                confidence: window.confidence.clone(),
                tags: window.tags.clone(),
                note: window.note.clone(),
                column,
                window_start: window.start,
                window_end: window.end,
                start,
                end,
                phase: SegmentPhase::of(start, end, now),
                top: vertical_offset(day, start, config),
                height: hours(end - start) * config.pixels_per_hour,
                left: column as f64 * config.column_width_percent,
                width: config.column_width_percent,
            }
        })
        .collect()
}

/// Pixels from the top of the day to `instant`.
pub fn vertical_offset(day: &ScheduleDay, instant: DateTime<Utc>, config: &LayoutConfig) -> f64 {
    day.hours_since_start(instant) * config.pixels_per_hour
}
