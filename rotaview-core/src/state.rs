//! Owned timeline state for hosts that re-render periodically.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::config::LayoutConfig;
use crate::day::ScheduleDay;
use crate::document::{OverridesDocument, ScheduleDocument};
use crate::model::RenderModel;
use crate::recompute::build_windows;
use crate::window::Window;

/// The current day's windows, rebuilt wholesale on every reload.
///
/// There is a single writer: a reload builds a complete new state and then
/// swaps it in, so readers never observe a half-built list.
#[derive(Debug, Clone)]
pub struct TimelineState {
    day: ScheduleDay,
    windows: Vec<Window>,
    metadata: Option<Value>,
}

impl TimelineState {
    pub fn build(
        schedule: &ScheduleDocument,
        overrides: Option<&OverridesDocument>,
        day: ScheduleDay,
    ) -> Self {
        TimelineState {
            windows: build_windows(schedule, overrides, &day),
            metadata: schedule.metadata.clone(),
            day,
        }
    }

    /// Rebuild from fresh documents and swap in, returning the old state.
    pub fn rebuild(
        &mut self,
        schedule: &ScheduleDocument,
        overrides: Option<&OverridesDocument>,
        day: ScheduleDay,
    ) -> TimelineState {
        let next = TimelineState::build(schedule, overrides, day);
        std::mem::replace(self, next)
    }

    /// Lay out the held windows for `now`.
    pub fn render(&self, now: DateTime<Utc>, config: &LayoutConfig) -> RenderModel {
        RenderModel::build(&self.windows, &self.day, now, config, self.metadata.clone())
    }

    pub fn day(&self) -> &ScheduleDay {
        &self.day
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    /// Whether `now` has moved past the day the windows were built for.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        now >= self.day.end() || now < self.day.start()
    }
}
