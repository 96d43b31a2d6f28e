//! The render model handed to renderers.

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::config::LayoutConfig;
use crate::day::{HOURS_PER_DAY, ScheduleDay};
use crate::layout::{Segment, layout, vertical_offset};
use crate::window::Window;

/// Everything needed to draw one frame of the timeline.
#[derive(Debug, Clone, Serialize)]
pub struct RenderModel {
    #[serde(skip)]
    pub day: ScheduleDay,
    /// Local midnight the timeline starts at
    pub day_start: DateTime<FixedOffset>,
    pub now: DateTime<FixedOffset>,
    pub segments: Vec<Segment>,
    pub column_count: usize,
    pub marker: TimeMarker,
    pub hours: Vec<HourMark>,
    /// Suggested scroll position: a little above the marker
    pub scroll_offset: f64,
    /// Height of the whole day, in pixels
    pub total_height: f64,
    /// Windows on air right now
    pub live: Vec<Window>,
    /// Schedule metadata, passed through untouched
    pub metadata: Option<Value>,
}

/// Current-time indicator
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeMarker {
    pub offset: f64,
}

/// Hour ruler entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourMark {
    pub hour: i64,
    /// Local wall-clock label, e.g. "14:00"
    pub label: String,
    pub offset: f64,
    /// The hour `now` falls in
    pub is_current: bool,
}

impl RenderModel {
    pub fn build(
        windows: &[Window],
        day: &ScheduleDay,
        now: DateTime<Utc>,
        config: &LayoutConfig,
        metadata: Option<Value>,
    ) -> Self {
        let timeline = layout(windows, day, now, config);
        let marker = TimeMarker {
            offset: vertical_offset(day, now, config),
        };
        let current_hour = day.hours_since_start(now).floor() as i64;

        let hours = (0..HOURS_PER_DAY)
            .map(|hour| {
                let start = day.hour_start(hour);
                HourMark {
                    hour,
                    label: day.local(start).format("%H:%M").to_string(),
                    offset: vertical_offset(day, start, config),
                    is_current: hour == current_hour,
                }
            })
            .collect();

        let live = timeline
            .windows
            .iter()
            .filter(|w| w.is_live(now))
            .cloned()
            .collect();

        RenderModel {
            day: *day,
            day_start: day.local(day.start()),
            now: day.local(now),
            segments: timeline.segments,
            column_count: timeline.column_count,
            marker,
            hours,
            scroll_offset: (marker.offset - config.scroll_padding_px).max(0.0),
            total_height: HOURS_PER_DAY as f64 * config.pixels_per_hour,
            live,
            metadata,
        }
    }

    /// Nothing scheduled today
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
