//! Pure eligibility rules for the scheduler tick.
//!
//! Everything here is side effect free so the decision logic can be tested
//! without a database: the evaluator gathers the inputs (schedule, blocking
//! rules, today's execution state) and this module answers whether the
//! schedule fires now.

use crate::models::{BlockKind, CampaignBlockedDate, CampaignSchedule};
use crate::scheduler::clock::{LocalParts, is_within_tolerance, parse_days_of_week};

/// Outcome of evaluating one schedule against one tick instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Due,
    Skip(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    OutsideTimeWindow,
    DayNotScheduled,
    DateBlocked,
    AlreadyExecutedToday,
}

impl SkipReason {
    /// Message used in the tick results payload.
    pub fn message(&self) -> &'static str {
        match self {
            SkipReason::OutsideTimeWindow => "outside the schedule time window",
            SkipReason::DayNotScheduled => "today is not a scheduled weekday",
            SkipReason::DateBlocked => "today is blocked for this campaign",
            SkipReason::AlreadyExecutedToday => "campaign already executed today",
        }
    }
}

/// Whether the tick instant falls inside the schedule's start window.
pub fn is_time_match(
    schedule: &CampaignSchedule,
    at: &LocalParts,
    tolerance_minutes: i64,
) -> bool {
    is_within_tolerance(at.time, schedule.start_time, tolerance_minutes)
}

/// Whether the tick weekday appears in the schedule's day list.
pub fn is_day_match(schedule: &CampaignSchedule, at: &LocalParts) -> bool {
    parse_days_of_week(&schedule.days_of_week).contains(&at.weekday)
}

/// Whether any blocking rule of the campaign covers the tick date.
pub fn is_date_blocked(blocks: &[CampaignBlockedDate], at: &LocalParts) -> bool {
    blocks.iter().any(|block| match block.block_kind {
        BlockKind::Specific => block.blocked_date == Some(at.date),
        BlockKind::DayOfWeek => block.blocked_weekday == Some(i16::from(at.weekday)),
    })
}

/// Full eligibility decision for one schedule.
///
/// Blocking rules and the completed-today flag are campaign-scoped: when
/// several schedules point at one campaign, each is evaluated on its own
/// but all of them share the once-per-day gate.
pub fn evaluate(
    schedule: &CampaignSchedule,
    blocks: &[CampaignBlockedDate],
    already_executed_today: bool,
    at: &LocalParts,
    tolerance_minutes: i64,
) -> Eligibility {
    if !is_time_match(schedule, at, tolerance_minutes) {
        return Eligibility::Skip(SkipReason::OutsideTimeWindow);
    }
    if !is_day_match(schedule, at) {
        return Eligibility::Skip(SkipReason::DayNotScheduled);
    }
    if is_date_blocked(blocks, at) {
        return Eligibility::Skip(SkipReason::DateBlocked);
    }
    if already_executed_today {
        return Eligibility::Skip(SkipReason::AlreadyExecutedToday);
    }
    Eligibility::Due
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, Utc};
    use proptest::prelude::*;
    use uuid::Uuid;

    fn schedule(start: &str, days: &str) -> CampaignSchedule {
        CampaignSchedule {
            id: Uuid::new_v4(),
            campaign_id: Uuid::new_v4(),
            start_time: start.parse().unwrap(),
            days_of_week: days.to_string(),
            is_active: true,
            is_recurring: true,
            last_executed_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn at(date: (i32, u32, u32), time: (u32, u32), weekday: u8) -> LocalParts {
        LocalParts {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            time: NaiveTime::from_hms_opt(time.0, time.1, 0).unwrap(),
            weekday,
        }
    }

    fn specific_block(date: (i32, u32, u32)) -> CampaignBlockedDate {
        block(
            BlockKind::Specific,
            Some(NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap()),
            None,
        )
    }

    fn weekday_block(weekday: i16) -> CampaignBlockedDate {
        block(BlockKind::DayOfWeek, None, Some(weekday))
    }

    fn block(
        kind: BlockKind,
        date: Option<NaiveDate>,
        weekday: Option<i16>,
    ) -> CampaignBlockedDate {
        CampaignBlockedDate {
            id: Uuid::new_v4(),
            campaign_id: Uuid::new_v4(),
            block_kind: kind,
            blocked_date: date,
            blocked_weekday: weekday,
            reason: None,
            created_at: Utc::now(),
        }
    }

    // 2025-06-02 is a Monday.
    const MONDAY: (i32, u32, u32) = (2025, 6, 2);

    #[test]
    fn time_window_follows_the_tolerance() {
        let s = schedule("09:00:00", "1");
        assert!(is_time_match(&s, &at(MONDAY, (9, 0), 1), 1));
        assert!(is_time_match(&s, &at(MONDAY, (9, 1), 1), 1));
        assert!(is_time_match(&s, &at(MONDAY, (8, 59), 1), 1));
        assert!(!is_time_match(&s, &at(MONDAY, (9, 2), 1), 1));
        assert!(!is_time_match(&s, &at(MONDAY, (8, 58), 1), 1));
    }

    #[test]
    fn stored_seconds_do_not_affect_the_match() {
        let s = schedule("09:00:45", "1");
        assert!(is_time_match(&s, &at(MONDAY, (9, 1), 1), 1));
    }

    #[test]
    fn day_gate_uses_zero_based_sunday() {
        let s = schedule("09:00:00", "1,3,5");
        for weekday in [1u8, 3, 5] {
            assert!(is_day_match(&s, &at(MONDAY, (9, 0), weekday)));
        }
        for weekday in [0u8, 2, 4, 6] {
            assert!(!is_day_match(&s, &at(MONDAY, (9, 0), weekday)));
        }
    }

    #[test]
    fn specific_date_block_wins_over_a_matching_window() {
        let s = schedule("09:00:00", "1");
        let blocks = vec![specific_block(MONDAY)];
        assert_eq!(
            evaluate(&s, &blocks, false, &at(MONDAY, (9, 0), 1), 1),
            Eligibility::Skip(SkipReason::DateBlocked)
        );
    }

    #[test]
    fn weekday_block_wins_over_a_matching_window() {
        let s = schedule("09:00:00", "1");
        let blocks = vec![weekday_block(1)];
        assert_eq!(
            evaluate(&s, &blocks, false, &at(MONDAY, (9, 0), 1), 1),
            Eligibility::Skip(SkipReason::DateBlocked)
        );
    }

    #[test]
    fn block_for_another_date_does_not_apply() {
        let s = schedule("09:00:00", "1");
        let blocks = vec![specific_block((2025, 6, 3)), weekday_block(2)];
        assert_eq!(
            evaluate(&s, &blocks, false, &at(MONDAY, (9, 0), 1), 1),
            Eligibility::Due
        );
    }

    #[test]
    fn completed_execution_blocks_the_rest_of_the_day() {
        let s = schedule("09:00:00", "1");
        assert_eq!(
            evaluate(&s, &[], true, &at(MONDAY, (9, 0), 1), 1),
            Eligibility::Skip(SkipReason::AlreadyExecutedToday)
        );
    }

    #[test]
    fn time_window_is_checked_before_blocking_rules() {
        let s = schedule("09:00:00", "1");
        let blocks = vec![specific_block(MONDAY)];
        assert_eq!(
            evaluate(&s, &blocks, true, &at(MONDAY, (15, 0), 1), 1),
            Eligibility::Skip(SkipReason::OutsideTimeWindow)
        );
    }

    #[test]
    fn due_when_all_gates_pass() {
        let s = schedule("14:00:00", "0,1,2,3,4,5,6");
        assert_eq!(
            evaluate(&s, &[], false, &at(MONDAY, (14, 1), 1), 1),
            Eligibility::Due
        );
    }

    proptest! {
        /// The window is symmetric around the start time for any offset.
        #[test]
        fn prop_window_symmetric_around_start(offset in -120i64..=120, tolerance in 0i64..=30) {
            let s = schedule("12:00:00", "1");
            let minute = (12 * 60 + offset) as u32;
            let now = NaiveTime::from_hms_opt(minute / 60, minute % 60, 0).unwrap();
            let parts = LocalParts {
                date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
                time: now,
                weekday: 1,
            };
            prop_assert_eq!(
                is_time_match(&s, &parts, tolerance),
                offset.abs() <= tolerance
            );
        }
    }
}
