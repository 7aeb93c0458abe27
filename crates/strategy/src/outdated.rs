//! Numeric and calendar rules shared by every strategy.

use chrono::{Datelike, NaiveDate};
use launchpad_core::types::Campaign;
use launchpad_core::LifecycleResult;

use crate::StrategyContext;

/// Progress toward `goal` as a truncated percentage. Zero when the goal is
/// not positive; may exceed 100.
pub fn percent_of(total: i64, goal: i64) -> i64 {
    if goal <= 0 {
        return 0;
    }
    total.saturating_mul(100) / goal
}

/// Whether a campaign that is still in Search has gone stale.
///
/// Only compares day-of-month within the release date's own year and
/// month: a release on the 31st is never outdated, and nothing is
/// outdated once the calendar has moved into the next month.
pub fn is_outdated(release: NaiveDate, today: NaiveDate) -> bool {
    today.year() == release.year() && today.month() == release.month() && today.day() > release.day()
}

/// Closes the campaign as failed if its release date has passed.
pub(crate) async fn close_if_outdated(
    ctx: &StrategyContext,
    campaign: &mut Campaign,
) -> LifecycleResult<bool> {
    if !is_outdated(campaign.release_day(), ctx.today()) {
        return Ok(false);
    }
    ctx.close(campaign).await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_percent_zero_goal() {
        assert_eq!(percent_of(0, 0), 0);
        assert_eq!(percent_of(999, 0), 0);
    }

    #[test]
    fn test_percent_extreme_inputs() {
        assert_eq!(percent_of(i64::MIN, -1), 0);
        assert_eq!(percent_of(500, -5), 0);
        assert_eq!(percent_of(i64::MAX, 1), i64::MAX);
        assert_eq!(percent_of(i64::MIN, 1), i64::MIN);
    }

    #[test]
    fn test_percent_truncates() {
        assert_eq!(percent_of(29, 100), 29);
        assert_eq!(percent_of(1, 3), 33);
        assert_eq!(percent_of(2, 3), 66);
        assert_eq!(percent_of(99, 100), 99);
        assert_eq!(percent_of(100, 100), 100);
    }

    #[test]
    fn test_percent_may_exceed_hundred() {
        assert_eq!(percent_of(250, 100), 250);
    }

    #[test]
    fn test_percent_monotonic_in_total() {
        let goal = 37;
        let mut previous = percent_of(0, goal);
        for total in 1..500 {
            let current = percent_of(total, goal);
            assert!(current >= previous, "dropped at total={total}");
            previous = current;
        }
    }

    #[test]
    fn test_outdated_on_later_day_same_month() {
        assert!(is_outdated(date(2026, 6, 15), date(2026, 6, 16)));
        assert!(is_outdated(date(2026, 6, 15), date(2026, 6, 30)));
    }

    #[test]
    fn test_not_outdated_on_or_before_release_day() {
        assert!(!is_outdated(date(2026, 6, 15), date(2026, 6, 15)));
        assert!(!is_outdated(date(2026, 6, 15), date(2026, 6, 14)));
    }

    #[test]
    fn test_outdated_month_boundary_is_never_detected() {
        // Release on the last day of a month: no later day exists within
        // the same month, and the first of the next month does not count.
        assert!(!is_outdated(date(2026, 6, 30), date(2026, 7, 1)));
        assert!(!is_outdated(date(2026, 1, 31), date(2026, 2, 1)));
    }

    #[test]
    fn test_outdated_ignores_later_months_and_years() {
        assert!(!is_outdated(date(2026, 6, 15), date(2026, 7, 20)));
        assert!(!is_outdated(date(2025, 12, 10), date(2026, 12, 11)));
        assert!(!is_outdated(date(2025, 12, 10), date(2026, 1, 11)));
    }
}
