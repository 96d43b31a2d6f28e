//! Which timezone "today" is evaluated in.

use anyhow::{Result, anyhow};
use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;
use rotaview_core::config::LayoutConfig;
use rotaview_core::document::{OverridesDocument, ScheduleDocument, parse_timestamp};
use rotaview_core::{RenderModel, ScheduleDay, recompute};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Zone {
    Local,
    Named(Tz),
}

impl Zone {
    pub fn resolve(tz: Option<&str>) -> Result<Self> {
        match tz {
            None => Ok(Zone::Local),
            Some(name) => name
                .parse::<Tz>()
                .map(Zone::Named)
                .map_err(|_| anyhow!("Unknown timezone '{}'", name)),
        }
    }

    /// The local day containing `now`
    pub fn day(&self, now: DateTime<Utc>) -> ScheduleDay {
        match self {
            Zone::Local => ScheduleDay::containing(&now.with_timezone(&Local)),
            Zone::Named(tz) => ScheduleDay::containing(&now.with_timezone(tz)),
        }
    }

    /// Run the full pipeline for `now` in this zone.
    pub fn recompute(
        &self,
        schedule: &ScheduleDocument,
        overrides: Option<&OverridesDocument>,
        now: DateTime<Utc>,
        layout: &LayoutConfig,
    ) -> RenderModel {
        match self {
            Zone::Local => recompute(schedule, overrides, &now.with_timezone(&Local), layout),
            Zone::Named(tz) => recompute(schedule, overrides, &now.with_timezone(tz), layout),
        }
    }
}

/// `--now` if given, else the system clock
pub fn resolve_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        Some(s) => Ok(parse_timestamp(s)?),
        None => Ok(Utc::now()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Weekday};

    #[test]
    fn test_resolve_named_zone() {
        assert_eq!(
            Zone::resolve(Some("Europe/Berlin")).unwrap(),
            Zone::Named(chrono_tz::Europe::Berlin)
        );
        assert_eq!(Zone::resolve(None).unwrap(), Zone::Local);
        assert!(Zone::resolve(Some("Mars/Olympus")).is_err());
    }

    #[test]
    fn test_named_zone_day_boundaries() {
        let zone = Zone::Named(chrono_tz::Asia::Tokyo);
        // 20:00 UTC Friday is already Saturday in Tokyo
        let now = Utc.with_ymd_and_hms(2025, 3, 21, 20, 0, 0).unwrap();
        let day = zone.day(now);

        assert_eq!(day.weekday(), Weekday::Sat);
        assert_eq!(day.start(), Utc.with_ymd_and_hms(2025, 3, 21, 15, 0, 0).unwrap());
    }

    #[test]
    fn test_wall_clock_follows_dst_switch() {
        let zone = Zone::Named(chrono_tz::Europe::Berlin);
        // Berlin jumps from 02:00 to 03:00 on 2025-03-30
        let now = Utc.with_ymd_and_hms(2025, 3, 30, 12, 0, 0).unwrap();
        let model = zone.recompute(&ScheduleDocument::default(), None, now, &LayoutConfig::default());

        assert_eq!(model.day_start.format("%H:%M").to_string(), "00:00");
        assert_eq!(model.now.format("%a %H:%M").to_string(), "Sun 14:00");

        let labels: Vec<_> = model.hours.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(&labels[..4], ["00:00", "01:00", "03:00", "04:00"]);

        let current: Vec<_> = model
            .hours
            .iter()
            .filter(|h| h.is_current)
            .map(|h| h.label.as_str())
            .collect();
        assert_eq!(current, ["14:00"]);
    }

    #[test]
    fn test_resolve_now() {
        assert_eq!(
            resolve_now(Some("2025-03-19T14:30:00Z")).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 19, 14, 30, 0).unwrap()
        );
        assert!(resolve_now(Some("lunchtime")).is_err());
    }
}
