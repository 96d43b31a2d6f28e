//! The full pipeline: documents in, render model out.

use chrono::{DateTime, TimeZone, Utc};

use crate::config::LayoutConfig;
use crate::day::ScheduleDay;
use crate::document::{OverridesDocument, ScheduleDocument};
use crate::merge::merge_consecutive;
use crate::model::RenderModel;
use crate::normalize::normalize;
use crate::overrides::apply_overrides;
use crate::window::Window;

/// Normalize, apply overrides, then merge: the windows for `day`.
pub fn build_windows(
    schedule: &ScheduleDocument,
    overrides: Option<&OverridesDocument>,
    day: &ScheduleDay,
) -> Vec<Window> {
    let normalized = normalize(schedule, day);
    let overridden = apply_overrides(&normalized, overrides);
    merge_consecutive(&overridden)
}

/// Compute the render model for the day containing `now`.
///
/// Pure: no I/O, no clock. The host calls this once per render cycle.
pub fn recompute<Tz: TimeZone>(
    schedule: &ScheduleDocument,
    overrides: Option<&OverridesDocument>,
    now: &DateTime<Tz>,
    config: &LayoutConfig,
) -> RenderModel {
    let day = ScheduleDay::containing(now);
    let windows = build_windows(schedule, overrides, &day);

    RenderModel::build(
        &windows,
        &day,
        now.with_timezone(&Utc),
        config,
        schedule.metadata.clone(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SegmentPhase;
    use crate::window::Confidence;
    use chrono::{Duration, FixedOffset};
    use serde_json::json;

    fn library_schedule() -> ScheduleDocument {
        serde_json::from_value(json!({
            "weekday_rotation": { "schedule": [
                { "hour": 14, "map": "Library", "variant": "Day", "confidence": "official" }
            ]},
            "weekend_additions": { "schedule": [
                { "hour": 14, "map": "Harbor", "variant": "Night" }
            ]}
        }))
        .unwrap()
    }

    #[test]
    fn test_wednesday_has_single_library_window() {
        // 2025-03-19 is a Wednesday
        let now = Utc.with_ymd_and_hms(2025, 3, 19, 9, 0, 0).unwrap();
        let day = ScheduleDay::containing(&now);
        let windows = build_windows(&library_schedule(), None, &day);

        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].map, "Library");
        assert_eq!(windows[0].start, day.hour_start(14));
        assert_eq!(windows[0].end, day.hour_start(15));
        assert_eq!(windows[0].confidence, Confidence::Official);

        let model = recompute(&library_schedule(), None, &now, &LayoutConfig::default());
        assert_eq!(model.column_count, 1);
        assert_eq!(model.segments.len(), 1);
        assert_eq!(model.segments[0].phase, SegmentPhase::Future);
    }

    #[test]
    fn test_saturday_weekend_addition_gets_second_column() {
        // 2025-03-22 is a Saturday
        let now = Utc.with_ymd_and_hms(2025, 3, 22, 14, 30, 0).unwrap();
        let model = recompute(&library_schedule(), None, &now, &LayoutConfig::default());

        assert_eq!(model.segments.len(), 2);
        assert_eq!(model.column_count, 2);

        let mut columns: Vec<_> = model.segments.iter().map(|s| (s.map.as_str(), s.column)).collect();
        columns.sort();
        assert_eq!(columns, vec![("Harbor", 1), ("Library", 0)]);
        assert!(model.segments.iter().all(|s| s.phase == SegmentPhase::Current));
        assert_eq!(model.live.len(), 2);
    }

    #[test]
    fn test_overrides_then_merge() {
        let schedule: ScheduleDocument = serde_json::from_value(json!({
            "weekday_rotation": { "schedule": [
                { "hour": 10, "map": "Library", "variant": "Day" },
                { "hour": 11, "map": "Harbor", "variant": "Day" },
                { "hour": 12, "map": "Library", "variant": "Day" }
            ]}
        }))
        .unwrap();
        let overrides: OverridesDocument = serde_json::from_value(json!({ "overrides": [
            { "action": "replace",
              "where": { "start": "2025-03-19T11:00:00Z", "end": "2025-03-19T12:00:00Z" },
              "with": { "map": "Library" } }
        ]}))
        .unwrap();

        let day = ScheduleDay::containing(&Utc.with_ymd_and_hms(2025, 3, 19, 9, 0, 0).unwrap());
        let windows = build_windows(&schedule, Some(&overrides), &day);

        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].start, day.hour_start(10));
        assert_eq!(windows[0].end, day.hour_start(13));
        // First window of the run wins
        assert_eq!(windows[0].confidence, Confidence::Official);
    }

    #[test]
    fn test_local_timezone_day() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2025, 3, 19, 14, 15, 0).unwrap();
        let model = recompute(&library_schedule(), None, &now, &LayoutConfig::default());

        let segment = &model.segments[0];
        assert_eq!(segment.start, Utc.with_ymd_and_hms(2025, 3, 19, 19, 0, 0).unwrap());
        assert_eq!(segment.end - segment.start, Duration::hours(1));
        assert_eq!(segment.phase, SegmentPhase::Current);
        assert_eq!(model.day_start.to_rfc3339(), "2025-03-19T00:00:00-05:00");
    }

    #[test]
    fn test_output_sorted_at_every_stage() {
        let schedule: ScheduleDocument = serde_json::from_value(json!({
            "always_available": [{ "map": "Range", "variant": "Practice" }],
            "weekday_rotation": { "schedule": [
                { "hour": 20, "map": "C", "variant": "V" },
                { "hour": 3, "map": "A", "variant": "V" },
                { "hour": 9, "map": "B", "variant": "V" }
            ]}
        }))
        .unwrap();
        let overrides: OverridesDocument = serde_json::from_value(json!({ "overrides": [
            { "action": "add",
              "window": { "map": "D", "variant": "V",
                          "start": "2025-03-19T01:00:00Z", "end": "2025-03-19T02:00:00Z" } }
        ]}))
        .unwrap();

        let day = ScheduleDay::containing(&Utc.with_ymd_and_hms(2025, 3, 19, 9, 0, 0).unwrap());
        let normalized = normalize(&schedule, &day);
        let overridden = apply_overrides(&normalized, Some(&overrides));
        let merged = merge_consecutive(&overridden);

        for list in [&normalized, &overridden, &merged] {
            assert!(list.windows(2).all(|p| p[0].start <= p[1].start));
        }
    }
}
