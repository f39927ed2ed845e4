//! Calendar scheduler: next date(s) from a fixed or floating recurrence rule.

use chrono::{Days, Months, NaiveDate};

use crate::config::{CalendarConfig, CalendarUnit};

/// Next calendar-triggered date on or after `today`.
///
/// One-time rules return the base date itself, and only while it has not
/// passed. Repeating rules advance by one interval up front when the first
/// occurrence is interval-scheduled or a completion history exists, then
/// keep adding intervals until the candidate is no longer overdue.
pub fn next_calendar_date(
    base: NaiveDate,
    config: &CalendarConfig,
    today: NaiveDate,
    has_completion: bool,
) -> Option<NaiveDate> {
    if !config.is_repeating {
        return (base >= today).then_some(base);
    }
    if config.repeat_every == 0 {
        return None;
    }

    let mut next = base;
    if config.schedule_first_from_interval || has_completion {
        next = add_interval(next, config)?;
    }
    while next < today {
        next = add_interval(next, config)?;
    }
    Some(next)
}

/// One interval of calendar arithmetic. Month and year additions clamp the
/// day-of-month per standard rollover (Jan 31 + 1 month = end of February).
pub(crate) fn add_interval(date: NaiveDate, config: &CalendarConfig) -> Option<NaiveDate> {
    match config.unit {
        CalendarUnit::Day => date.checked_add_days(Days::new(u64::from(config.repeat_every))),
        CalendarUnit::Month => date.checked_add_months(Months::new(config.repeat_every)),
        CalendarUnit::Year => date.checked_add_months(Months::new(config.repeat_every * 12)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn repeating(every: u32, unit: CalendarUnit) -> CalendarConfig {
        CalendarConfig {
            is_repeating: true,
            repeat_every: every,
            unit,
            schedule_first_from_interval: false,
        }
    }

    #[test]
    fn one_time_task_only_while_in_the_future() {
        let cfg = CalendarConfig {
            is_repeating: false,
            repeat_every: 1,
            unit: CalendarUnit::Day,
            schedule_first_from_interval: false,
        };
        let today = d(2024, 10, 15);
        assert_eq!(
            next_calendar_date(d(2024, 11, 1), &cfg, today, false),
            Some(d(2024, 11, 1))
        );
        assert_eq!(next_calendar_date(today, &cfg, today, false), Some(today));
        // A past one-time task is not reissued.
        assert_eq!(next_calendar_date(d(2024, 10, 1), &cfg, today, false), None);
    }

    #[test]
    fn first_occurrence_on_base_date_by_default() {
        let cfg = repeating(1, CalendarUnit::Month);
        let next = next_calendar_date(d(2024, 11, 5), &cfg, d(2024, 10, 15), false);
        assert_eq!(next, Some(d(2024, 11, 5)));
    }

    #[test]
    fn first_occurrence_advances_when_interval_scheduled_or_completed() {
        let cfg = CalendarConfig {
            schedule_first_from_interval: true,
            ..repeating(1, CalendarUnit::Month)
        };
        let next = next_calendar_date(d(2024, 10, 20), &cfg, d(2024, 10, 15), false);
        assert_eq!(next, Some(d(2024, 11, 20)));

        // A completion history forces the same advance.
        let cfg = repeating(1, CalendarUnit::Month);
        let next = next_calendar_date(d(2024, 10, 20), &cfg, d(2024, 10, 15), true);
        assert_eq!(next, Some(d(2024, 11, 20)));
    }

    #[test]
    fn overdue_base_skips_forward_to_soonest_future_date() {
        let cfg = repeating(10, CalendarUnit::Day);
        let next = next_calendar_date(d(2024, 9, 1), &cfg, d(2024, 10, 15), false);
        // 9-01, 9-11, 9-21, 10-01, 10-11 are all overdue; 10-21 is next.
        assert_eq!(next, Some(d(2024, 10, 21)));
    }

    #[test]
    fn month_addition_clamps_day_of_month() {
        let cfg = repeating(1, CalendarUnit::Month);
        assert_eq!(add_interval(d(2024, 1, 31), &cfg), Some(d(2024, 2, 29)));
        assert_eq!(add_interval(d(2023, 1, 31), &cfg), Some(d(2023, 2, 28)));
    }

    #[test]
    fn year_unit_adds_whole_years() {
        let cfg = repeating(2, CalendarUnit::Year);
        let next = next_calendar_date(d(2024, 3, 1), &cfg, d(2024, 1, 1), false);
        assert_eq!(next, Some(d(2024, 3, 1)));
        let next = next_calendar_date(d(2024, 3, 1), &cfg, d(2024, 4, 1), false);
        assert_eq!(next, Some(d(2026, 3, 1)));
    }

    #[test]
    fn zero_interval_yields_nothing_instead_of_looping() {
        let cfg = repeating(0, CalendarUnit::Day);
        assert_eq!(next_calendar_date(d(2024, 9, 1), &cfg, d(2024, 10, 15), false), None);
    }
}
