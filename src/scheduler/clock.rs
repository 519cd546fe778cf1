//! Clock abstraction and local-time helpers for schedule evaluation.
//!
//! Every eligibility decision happens in the configured IANA timezone.
//! This module converts an injectable UTC instant into the local parts
//! (calendar date, HH:MM time, weekday) those decisions consume.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Timelike, Utc, Weekday};
use chrono_tz::Tz;

/// Source of "now". Injected so tests can pin arbitrary instants.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Production clock backed by system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Local calendar context of one tick instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalParts {
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// 0=Sunday .. 6=Saturday.
    pub weekday: u8,
}

pub fn local_parts(now_utc: DateTime<Utc>, tz: Tz) -> LocalParts {
    let local = now_utc.with_timezone(&tz);
    LocalParts {
        date: local.date_naive(),
        time: local.time(),
        weekday: weekday_number(local.weekday()),
    }
}

/// Weekday in the 0=Sunday .. 6=Saturday convention used by schedule
/// day lists and weekday blocks.
pub fn weekday_number(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}

fn minute_of_day(t: NaiveTime) -> i64 {
    i64::from(t.hour()) * 60 + i64::from(t.minute())
}

/// Whether `now` falls within `tolerance_minutes` of `target`, comparing
/// both at HH:MM resolution (seconds dropped). Distance is measured within
/// the local day, so a schedule near midnight does not match from the
/// other side of it.
pub fn is_within_tolerance(now: NaiveTime, target: NaiveTime, tolerance_minutes: i64) -> bool {
    (minute_of_day(now) - minute_of_day(target)).abs() <= tolerance_minutes
}

/// Parses a comma-separated weekday list (e.g. `"1,3,5"`) into weekday
/// numbers. Malformed or out-of-range entries are dropped; creation-time
/// validation keeps them out of the database in the first place.
pub fn parse_days_of_week(list: &str) -> Vec<u8> {
    list.split(',')
        .filter_map(|part| part.trim().parse::<u8>().ok())
        .filter(|day| *day <= 6)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn time(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn weekday_numbers_run_sunday_to_saturday() {
        assert_eq!(weekday_number(Weekday::Sun), 0);
        assert_eq!(weekday_number(Weekday::Mon), 1);
        assert_eq!(weekday_number(Weekday::Sat), 6);
    }

    #[test]
    fn tolerance_window_is_inclusive_both_sides() {
        let target = time(9, 0, 0);
        assert!(is_within_tolerance(time(9, 0, 0), target, 1));
        assert!(is_within_tolerance(time(9, 1, 0), target, 1));
        assert!(is_within_tolerance(time(8, 59, 0), target, 1));
        assert!(!is_within_tolerance(time(9, 2, 0), target, 1));
        assert!(!is_within_tolerance(time(8, 58, 0), target, 1));
    }

    #[test]
    fn seconds_are_dropped_on_both_sides() {
        assert!(is_within_tolerance(time(9, 1, 59), time(9, 0, 45), 1));
    }

    #[test]
    fn no_wrap_across_midnight() {
        assert!(!is_within_tolerance(time(23, 59, 0), time(0, 0, 0), 1));
        assert!(!is_within_tolerance(time(0, 0, 0), time(23, 59, 0), 1));
    }

    #[test]
    fn zero_tolerance_requires_exact_minute() {
        let target = time(14, 30, 0);
        assert!(is_within_tolerance(time(14, 30, 59), target, 0));
        assert!(!is_within_tolerance(time(14, 31, 0), target, 0));
    }

    #[test]
    fn parse_days_of_week_trims_and_drops_garbage() {
        assert_eq!(parse_days_of_week("1,3,5"), vec![1, 3, 5]);
        assert_eq!(parse_days_of_week(" 0 , 6 "), vec![0, 6]);
        assert_eq!(parse_days_of_week("7,x,3,-1"), vec![3]);
        assert!(parse_days_of_week("").is_empty());
    }

    #[test]
    fn local_parts_rolls_the_date_with_the_timezone() {
        // 2025-06-02T01:30:00Z is still Sunday June 1st, 22:30 in Sao Paulo.
        let now = Utc.with_ymd_and_hms(2025, 6, 2, 1, 30, 0).unwrap();
        let at = local_parts(now, chrono_tz::America::Sao_Paulo);
        assert_eq!(at.date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(at.time, time(22, 30, 0));
        assert_eq!(at.weekday, 0);
    }
}
