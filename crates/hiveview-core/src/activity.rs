//! Inactivity detection for directories and groups.

use chrono::{DateTime, Utc};

use crate::model::TestRun;

/// A source is inactive when its newest run is older than this many days.
pub const INACTIVITY_THRESHOLD_DAYS: i64 = 7;

/// Whether more than [`INACTIVITY_THRESHOLD_DAYS`] whole days have elapsed
/// since `start`. Partial days do not count.
pub fn is_stale(start: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    (now - start).num_days() > INACTIVITY_THRESHOLD_DAYS
}

/// No runs at all is not treated as inactive.
pub fn is_inactive(most_recent: Option<&TestRun>, now: DateTime<Utc>) -> bool {
    most_recent.is_some_and(|run| is_stale(run.start, now))
}

/// Newest run by start time; the first one wins on ties.
pub fn most_recent(runs: &[TestRun]) -> Option<&TestRun> {
    runs.iter()
        .fold(None, |best: Option<&TestRun>, run| match best {
            Some(b) if b.start >= run.start => Some(b),
            _ => Some(run),
        })
}

/// Active items first, inactive after; relative order is otherwise kept.
pub fn order_by_activity<T, F>(items: Vec<T>, inactive: F) -> Vec<T>
where
    F: Fn(&T) -> bool,
{
    let (inactive_items, mut active): (Vec<T>, Vec<T>) = items.into_iter().partition(|i| inactive(i));
    active.extend(inactive_items);
    active
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn run_at(start: DateTime<Utc>) -> TestRun {
        TestRun::new("t", ["geth"], start, 1, 0)
    }

    #[test]
    fn test_threshold_boundary() {
        let eight = run_at(now() - Duration::days(8));
        let seven = run_at(now() - Duration::days(7));
        assert!(is_inactive(Some(&eight), now()));
        assert!(!is_inactive(Some(&seven), now()));
        assert!(is_inactive(Some(&run_at(now() - Duration::days(8) - Duration::hours(3))), now()));
    }

    #[test]
    fn test_partial_days_do_not_count() {
        let seven_and_half = run_at(now() - Duration::days(7) - Duration::hours(12));
        let almost_eight = run_at(now() - Duration::days(8) + Duration::seconds(1));
        assert!(!is_inactive(Some(&seven_and_half), now()));
        assert!(!is_inactive(Some(&almost_eight), now()));
        assert!(!is_stale(now() - Duration::days(7) - Duration::seconds(1), now()));
    }

    #[test]
    fn test_no_runs_is_active() {
        assert!(!is_inactive(None, now()));
        assert!(most_recent(&[]).is_none());
    }

    #[test]
    fn test_most_recent_first_on_tie() {
        let t = now();
        let runs = vec![
            run_at(t - Duration::days(2)),
            run_at(t).with_file_name("a"),
            run_at(t).with_file_name("b"),
        ];
        assert_eq!(most_recent(&runs).unwrap().file_name, "a");
    }

    #[test]
    fn test_order_by_activity_is_stable() {
        let items = vec![("a", true), ("b", false), ("c", true), ("d", false)];
        let ordered = order_by_activity(items, |(_, inactive)| *inactive);
        let names: Vec<&str> = ordered.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["b", "d", "a", "c"]);
    }
}
