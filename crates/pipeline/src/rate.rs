//! User success rate, recomputed from grouped campaign outcomes.

use launchpad_core::types::ProjectGroup;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserStats {
    pub project_count: i64,
    /// Successes over closed campaigns, rounded to two decimal places;
    /// zero while nothing has closed.
    pub success_rate: f64,
}

impl UserStats {
    pub fn from_groups(groups: &[ProjectGroup]) -> Self {
        let mut project_count = 0;
        let mut closed_count = 0;
        let mut success_count = 0;

        for group in groups {
            project_count += group.count;
            if group.closed {
                closed_count += group.count;
                if group.locked {
                    success_count += group.count;
                }
            }
        }

        let success_rate = if closed_count > 0 {
            (success_count as f64 * 100.0 / closed_count as f64).round() / 100.0
        } else {
            0.0
        };

        Self {
            project_count,
            success_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(count: i64, closed: bool, locked: bool) -> ProjectGroup {
        ProjectGroup {
            count,
            closed,
            locked,
        }
    }

    #[test]
    fn test_no_groups() {
        let stats = UserStats::from_groups(&[]);
        assert_eq!(stats.project_count, 0);
        assert_eq!(stats.success_rate, 0.0);
    }

    #[test]
    fn test_open_campaigns_count_but_do_not_rate() {
        let stats = UserStats::from_groups(&[group(2, false, false), group(1, false, true)]);
        assert_eq!(stats.project_count, 3);
        assert_eq!(stats.success_rate, 0.0);
    }

    #[test]
    fn test_rate_over_closed_only() {
        let stats = UserStats::from_groups(&[
            group(1, true, true),
            group(1, true, false),
            group(5, false, false),
        ]);
        assert_eq!(stats.project_count, 7);
        assert_eq!(stats.success_rate, 0.5);
    }

    #[test]
    fn test_rate_rounds_to_two_places() {
        let stats = UserStats::from_groups(&[group(1, true, true), group(2, true, false)]);
        assert_eq!(stats.success_rate, 0.33);
        let stats = UserStats::from_groups(&[group(2, true, true), group(1, true, false)]);
        assert_eq!(stats.success_rate, 0.67);
    }

    #[test]
    fn test_all_successful() {
        let stats = UserStats::from_groups(&[group(4, true, true)]);
        assert_eq!(stats.success_rate, 1.0);
    }

    #[test]
    fn test_recompute_is_stable() {
        let groups = [group(3, true, true), group(1, true, false), group(2, false, true)];
        assert_eq!(UserStats::from_groups(&groups), UserStats::from_groups(&groups));
    }
}
