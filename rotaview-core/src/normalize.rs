//! Expand the schedule document into today's windows.

use tracing::debug;

use crate::day::{HOURS_PER_DAY, ScheduleDay};
use crate::document::{HourlyRotation, ScheduleDocument};
use crate::window::{Window, sort_by_start};

/// Build the windows active on `day`, sorted by start.
///
/// - always-available entries span the whole day
/// - weekday rotation entries produce one-hour windows every day
/// - weekend additions do the same, Friday through Sunday only
pub fn normalize(schedule: &ScheduleDocument, day: &ScheduleDay) -> Vec<Window> {
    let mut windows: Vec<Window> = schedule
        .always_available
        .iter()
        .map(|entry| entry.window(day.start(), day.end()))
        .collect();

    expand_hourly(&schedule.weekday_rotation, day, &mut windows);

    if day.is_weekend() {
        expand_hourly(&schedule.weekend_additions, day, &mut windows);
    }

    sort_by_start(&mut windows);

    debug!(
        weekday = %day.weekday(),
        windows = windows.len(),
        "normalized schedule"
    );

    windows
}

fn expand_hourly(rotation: &HourlyRotation, day: &ScheduleDay, windows: &mut Vec<Window>) {
    for hour in 0..HOURS_PER_DAY {
        let start = day.hour_start(hour);
        let end = day.hour_start(hour + 1);
        windows.extend(rotation.entries_at(hour).map(|entry| entry.window(start, end)));
    }
}
