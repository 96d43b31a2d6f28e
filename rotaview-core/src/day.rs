//! The reference day a schedule is evaluated for.

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveTime, Offset, TimeZone, Timelike, Utc,
    Weekday,
};

pub const HOURS_PER_DAY: i64 = 24;

/// Local calendar day, anchored at local midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleDay {
    start: DateTime<Utc>,
    /// UTC offset in effect at each hour boundary, `0..=24`
    offsets: [FixedOffset; HOURS_PER_DAY as usize + 1],
    weekday: Weekday,
}

impl ScheduleDay {
    /// The day containing `now`, in `now`'s own timezone.
    pub fn containing<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let date = now.date_naive();
        let midnight = date.and_time(NaiveTime::MIN);

        // Midnight can fall in a DST gap; fall back to counting back from now
        let start = now
            .timezone()
            .from_local_datetime(&midnight)
            .earliest()
            .unwrap_or_else(|| {
                now.clone() - Duration::seconds(i64::from(now.num_seconds_from_midnight()))
            });

        let start = start.with_timezone(&Utc);
        let tz = now.timezone();
        let offsets = std::array::from_fn(|hour| {
            let boundary = start + Duration::hours(hour as i64);
            tz.offset_from_utc_datetime(&boundary.naive_utc()).fix()
        });

        ScheduleDay {
            start,
            offsets,
            weekday: date.weekday(),
        }
    }

    /// Local midnight as an instant
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive end, 24 hours after `start`
    pub fn end(&self) -> DateTime<Utc> {
        self.start + Duration::hours(HOURS_PER_DAY)
    }

    /// Start of the `hour`-th hour of the day
    pub fn hour_start(&self, hour: i64) -> DateTime<Utc> {
        self.start + Duration::hours(hour)
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// Friday through Sunday (ISO weekday 5..=7)
    pub fn is_weekend(&self) -> bool {
        (5..=7).contains(&self.weekday.number_from_monday())
    }

    /// Index of the hour containing `instant`, negative before the day.
    pub fn hour_index(&self, instant: DateTime<Utc>) -> i64 {
        let mut hour = self.hours_since_start(instant).floor() as i64;
        // Guard the float rounding at exact boundaries
        while self.hour_start(hour) > instant {
            hour -= 1;
        }
        while self.hour_start(hour + 1) <= instant {
            hour += 1;
        }
        hour
    }

    /// Local wall-clock time of an instant, using the offset in effect for
    /// its hour. Instants outside the day use the nearest edge's offset.
    pub fn local(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        let hour = self.hour_index(instant).clamp(0, HOURS_PER_DAY) as usize;
        instant.with_timezone(&self.offsets[hour])
    }

    /// Hours elapsed since the start of the day (fractional, may be negative).
    pub fn hours_since_start(&self, instant: DateTime<Utc>) -> f64 {
        hours(instant - self.start)
    }
}

/// Fractional hours in a duration
pub fn hours(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / 3_600_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containing_uses_local_midnight() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2025, 3, 19, 14, 30, 0).unwrap();
        let day = ScheduleDay::containing(&now);

        assert_eq!(day.start(), Utc.with_ymd_and_hms(2025, 3, 18, 22, 0, 0).unwrap());
        assert_eq!(day.end(), Utc.with_ymd_and_hms(2025, 3, 19, 22, 0, 0).unwrap());
        assert_eq!(day.weekday(), Weekday::Wed);
        assert_eq!(day.local(day.start()).hour(), 0);
    }

    #[test]
    fn test_weekend_is_friday_through_sunday() {
        // 2025-03-17 is a Monday
        let expected = [false, false, false, false, true, true, true];
        for (offset, weekend) in expected.iter().enumerate() {
            let now = Utc.with_ymd_and_hms(2025, 3, 17 + offset as u32, 12, 0, 0).unwrap();
            assert_eq!(ScheduleDay::containing(&now).is_weekend(), *weekend);
        }
    }

    #[test]
    fn test_hour_index() {
        let now = Utc.with_ymd_and_hms(2025, 3, 19, 13, 45, 0).unwrap();
        let day = ScheduleDay::containing(&now);
        assert_eq!(day.hour_index(now), 13);
        assert_eq!(day.hour_index(day.hour_start(7)), 7);
        assert_eq!(day.hour_index(day.start() - Duration::minutes(1)), -1);
        assert_eq!(day.hour_index(day.end()), 24);
    }

    #[test]
    fn test_hours_since_start() {
        let now = Utc.with_ymd_and_hms(2025, 3, 19, 13, 45, 0).unwrap();
        let day = ScheduleDay::containing(&now);
        assert_eq!(day.hours_since_start(now), 13.75);
        assert_eq!(day.hours_since_start(day.start() - Duration::hours(1)), -1.0);
    }
}
