//! Scheduled window reconciliation after a move.
//!
//! Each activity gets the window of the segment leaving its site (or, failing
//! that, of the segment arriving at it). When the moved activity's window is
//! inconsistent with a neighbour it takes that neighbour's window instead.
//! Missing data is treated as unscheduled; nothing here fails.

use crate::types::{Activity, DateRange, Segment};

/// Window associated with the activity's site in `segments`.
pub fn scheduled_date(activity: &Activity, segments: &[Segment]) -> Option<DateRange> {
    let uid = activity.site_uid();
    segments
        .iter()
        .find(|s| s.origin.uid == uid)
        .and_then(|s| s.scheduled_start_range)
        .or_else(|| {
            segments
                .iter()
                .find(|s| s.destination.uid == uid)
                .and_then(|s| s.scheduled_end_range)
        })
}

/// One window per activity, index-aligned with `activities`.
///
/// `moved_to_index` is the position the moved activity now occupies. Only that
/// entry may change. A conflict found when scanning forward overrides one
/// found scanning backward.
pub fn reconcile(
    activities: &[Activity],
    segments: &[Segment],
    moved_to_index: usize,
) -> Vec<Option<DateRange>> {
    let mut dates: Vec<Option<DateRange>> = activities
        .iter()
        .map(|a| scheduled_date(a, segments))
        .collect();

    let Some(moved) = dates.get(moved_to_index).copied().flatten() else {
        return dates;
    };

    // A preceding window starting after the moved one ends.
    let earlier = dates[..moved_to_index]
        .iter()
        .rev()
        .flatten()
        .find(|d| d.start > moved.end)
        .copied();
    // A following window ending before the moved one starts.
    let later = dates[moved_to_index + 1..]
        .iter()
        .flatten()
        .find(|d| d.end < moved.start)
        .copied();

    if let Some(earlier) = earlier {
        dates[moved_to_index] = Some(earlier);
    }
    if let Some(later) = later {
        dates[moved_to_index] = Some(later);
    }

    dates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::*;
    use crate::types::ActivityType;

    #[test]
    fn no_dates_yields_all_unscheduled() {
        let x = site_loading("X");
        let y = site_unloading("Y");
        let z = site_unloading("Z");
        let segments = vec![segment("s1", &x, &y), segment("s2", &y, &z)];
        let activities = vec![
            activity(&z, ActivityType::Unloading, &[]),
            activity(&x, ActivityType::Loading, &[]),
            activity(&y, ActivityType::Unloading, &[]),
        ];
        for i in 0..activities.len() {
            assert_eq!(reconcile(&activities, &segments, i), vec![None, None, None]);
        }
    }

    #[test]
    fn consistent_windows_are_unchanged() {
        // Y departs on s2 at 08:00-08:30; Z has no window.
        let x = site_loading("X");
        let y = site_unloading("Y");
        let z = site_unloading("Z");
        let segments = vec![
            scheduled(segment("s1", &x, &y), None, None),
            scheduled(segment("s2", &y, &z), Some(range(8, 0, 8, 30)), None),
        ];
        let activities = vec![
            activity(&y, ActivityType::Unloading, &[]),
            activity(&z, ActivityType::Unloading, &[]),
        ];
        let dates = reconcile(&activities, &segments, 0);
        assert_eq!(dates, vec![Some(range(8, 0, 8, 30)), None]);
    }

    #[test]
    fn departure_window_preferred_over_arrival() {
        let x = site_loading("X");
        let y = site_unloading("Y");
        let z = site_unloading("Z");
        let segments = vec![
            scheduled(segment("s1", &x, &y), None, Some(range(9, 0, 9, 30))),
            scheduled(segment("s2", &y, &z), Some(range(10, 0, 10, 30)), Some(range(11, 0, 11, 30))),
        ];
        let y_activity = activity(&y, ActivityType::Unloading, &[]);
        let z_activity = activity(&z, ActivityType::Unloading, &[]);
        assert_eq!(scheduled_date(&y_activity, &segments), Some(range(10, 0, 10, 30)));
        assert_eq!(scheduled_date(&z_activity, &segments), Some(range(11, 0, 11, 30)));
    }

    #[test]
    fn backward_conflict_borrows_earlier_window() {
        // After the move: [A(12:00), M(08:00), B(unscheduled)]; A starts after M ends.
        let a = site_loading("A");
        let m = site_loading("M");
        let b = site_unloading("B");
        let end = site_unloading("END");
        let segments = vec![
            scheduled(segment("s1", &a, &m), Some(range(12, 0, 12, 30)), None),
            scheduled(segment("s2", &m, &b), Some(range(8, 0, 8, 30)), None),
            segment("s3", &b, &end),
        ];
        let activities = vec![
            activity(&a, ActivityType::Loading, &[]),
            activity(&m, ActivityType::Loading, &[]),
            activity(&b, ActivityType::Unloading, &[]),
        ];
        let dates = reconcile(&activities, &segments, 1);
        assert_eq!(dates, vec![Some(range(12, 0, 12, 30)), Some(range(12, 0, 12, 30)), None]);
    }

    #[test]
    fn forward_conflict_wins_over_backward() {
        // [A(12:00), M(10:00), B(07:00)]: both A and B conflict with M.
        let a = site_loading("A");
        let m = site_loading("M");
        let b = site_unloading("B");
        let end = site_unloading("END");
        let segments = vec![
            scheduled(segment("s1", &a, &m), Some(range(12, 0, 12, 30)), None),
            scheduled(segment("s2", &m, &b), Some(range(10, 0, 10, 30)), None),
            scheduled(segment("s3", &b, &end), Some(range(7, 0, 7, 30)), None),
        ];
        let activities = vec![
            activity(&a, ActivityType::Loading, &[]),
            activity(&m, ActivityType::Loading, &[]),
            activity(&b, ActivityType::Unloading, &[]),
        ];
        let dates = reconcile(&activities, &segments, 1);
        assert_eq!(dates[1], Some(range(7, 0, 7, 30)));
        assert_eq!(dates[0], Some(range(12, 0, 12, 30)));
        assert_eq!(dates[2], Some(range(7, 0, 7, 30)));
    }

    #[test]
    fn unscheduled_moved_activity_is_left_alone() {
        let a = site_loading("A");
        let m = site_loading("M");
        let end = site_unloading("END");
        let segments = vec![
            scheduled(segment("s1", &a, &m), Some(range(12, 0, 12, 30)), None),
            segment("s2", &m, &end),
        ];
        let activities = vec![
            activity(&a, ActivityType::Loading, &[]),
            activity(&m, ActivityType::Loading, &[]),
        ];
        assert_eq!(reconcile(&activities, &segments, 1), vec![Some(range(12, 0, 12, 30)), None]);
        assert_eq!(reconcile(&activities, &segments, 7).len(), 2);
    }
}
