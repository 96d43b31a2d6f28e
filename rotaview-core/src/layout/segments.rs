//! Slicing windows at calendar-hour boundaries.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::day::{HOURS_PER_DAY, ScheduleDay};
use crate::window::Window;

/// Where a segment sits relative to the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentPhase {
    Past,
    Current,
    Future,
}

impl SegmentPhase {
    pub fn of(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if end <= now {
            SegmentPhase::Past
        } else if start <= now {
            SegmentPhase::Current
        } else {
            SegmentPhase::Future
        }
    }
}

/// Hours either side of the day that still get sliced.
const SLICE_MARGIN_HOURS: i64 = HOURS_PER_DAY;

/// Clipped `[start, end)` pieces of `window`, one per calendar hour of `day`
/// it touches. Empty for zero-length or inverted windows.
///
/// Pieces more than a day outside `day` are never produced, so a window
/// stretching across years yields at most three days of slices.
pub fn hour_slices(window: &Window, day: &ScheduleDay) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    let from = window.start.max(day.hour_start(-SLICE_MARGIN_HOURS));
    let to = window.end.min(day.hour_start(HOURS_PER_DAY + SLICE_MARGIN_HOURS));
    if to <= from {
        return Vec::new();
    }

    let mut hour = day.hour_index(from);
    let mut slices = Vec::new();
    let mut cursor = from;
    while cursor < to {
        let end = day.hour_start(hour + 1).min(to);
        slices.push((cursor, end));
        cursor = end;
        hour += 1;
    }

    slices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::tests::{at, make_window};
    use chrono::{Duration, TimeZone};

    fn day() -> ScheduleDay {
        ScheduleDay::containing(&at(12, 0))
    }

    #[test]
    fn test_whole_hours_slice_per_hour() {
        let w = make_window("A", "V", at(10, 0), at(13, 0));
        assert_eq!(
            hour_slices(&w, &day()),
            vec![(at(10, 0), at(11, 0)), (at(11, 0), at(12, 0)), (at(12, 0), at(13, 0))]
        );
    }

    #[test]
    fn test_partial_hours_are_clipped() {
        let w = make_window("A", "V", at(10, 30), at(12, 15));
        assert_eq!(
            hour_slices(&w, &day()),
            vec![(at(10, 30), at(11, 0)), (at(11, 0), at(12, 0)), (at(12, 0), at(12, 15))]
        );
    }

    #[test]
    fn test_within_one_hour() {
        let w = make_window("A", "V", at(10, 10), at(10, 20));
        assert_eq!(hour_slices(&w, &day()), vec![(at(10, 10), at(10, 20))]);
    }

    #[test]
    fn test_slices_cover_duration_exactly() {
        let day = day();
        let windows = [
            make_window("A", "V", at(0, 0), at(0, 0) + Duration::hours(24)),
            make_window("B", "V", at(3, 17), at(9, 41)),
            make_window("C", "V", at(0, 0) - Duration::minutes(90), at(1, 5)),
        ];

        for w in &windows {
            let slices = hour_slices(w, &day);
            let total = slices.iter().fold(Duration::zero(), |acc, (s, e)| acc + (*e - *s));
            assert_eq!(total, w.duration(), "{w}");
            assert!(slices.windows(2).all(|p| p[0].1 == p[1].0), "{w} has gaps");
            assert_eq!(slices.first().unwrap().0, w.start);
            assert_eq!(slices.last().unwrap().1, w.end);
        }
    }

    #[test]
    fn test_window_starting_before_the_day() {
        let w = make_window("A", "V", at(0, 0) - Duration::minutes(30), at(1, 0));
        assert_eq!(
            hour_slices(&w, &day()),
            vec![(at(0, 0) - Duration::minutes(30), at(0, 0)), (at(0, 0), at(1, 0))]
        );
    }

    #[test]
    fn test_very_long_windows_are_bounded() {
        let day = day();
        let start = Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(9999, 1, 1, 0, 0, 0).unwrap();
        let slices = hour_slices(&make_window("A", "V", start, end), &day);

        assert_eq!(slices.len(), 72);
        assert_eq!(slices.first().unwrap().0, day.start() - Duration::hours(24));
        assert_eq!(slices.last().unwrap().1, day.end() + Duration::hours(24));
    }

    #[test]
    fn test_empty_windows_have_no_slices() {
        assert!(hour_slices(&make_window("A", "V", at(11, 0), at(11, 0)), &day()).is_empty());
        assert!(hour_slices(&make_window("A", "V", at(11, 0), at(10, 0)), &day()).is_empty());
    }

    #[test]
    fn test_phase() {
        let now = at(11, 30);
        assert_eq!(SegmentPhase::of(at(10, 0), at(11, 0), now), SegmentPhase::Past);
        assert_eq!(SegmentPhase::of(at(10, 30), at(11, 30), now), SegmentPhase::Past);
        assert_eq!(SegmentPhase::of(at(11, 0), at(12, 0), now), SegmentPhase::Current);
        assert_eq!(SegmentPhase::of(at(11, 30), at(12, 0), now), SegmentPhase::Current);
        assert_eq!(SegmentPhase::of(at(12, 0), at(13, 0), now), SegmentPhase::Future);
    }
}
