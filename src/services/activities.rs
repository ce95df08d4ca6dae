//! Activity derivation and mean groups.
//!
//! Activities are derived 1:1 from the loading/unloading sites of the segment
//! path. Break sites split the path into mean groups; each group is driven by
//! the trucker/vehicle of its first segment.

use crate::services::break_metadata::break_metadata;
use crate::types::{
    Activity, ActivityStatus, ActivityType, BreakMetadata, Delivery, MeanGroup, Segment, Site,
    SiteType, StatusUpdate, StatusUpdateType, Transport,
};

/// Status of the activity at `site_uid` according to the status log.
pub fn activity_status(site_uid: &str, status_updates: &[StatusUpdate]) -> ActivityStatus {
    let mut status = ActivityStatus::NotStarted;
    for update in status_updates.iter().filter(|u| u.refers_to_site(site_uid)) {
        match update.update_type {
            StatusUpdateType::LoadingComplete
            | StatusUpdateType::UnloadingComplete
            | StatusUpdateType::Departed => return ActivityStatus::Done,
            StatusUpdateType::Arrived
            | StatusUpdateType::LoadingStarted
            | StatusUpdateType::UnloadingStarted => status = ActivityStatus::Started,
            _ => {}
        }
    }
    status
}

/// Activity for a loading/unloading site, `None` for break sites.
pub fn activity_for_site(
    site: &Site,
    deliveries: &[Delivery],
    status_updates: &[StatusUpdate],
) -> Option<Activity> {
    let activity_type = match site.site_type {
        SiteType::Loading => ActivityType::Loading,
        SiteType::Unloading => ActivityType::Unloading,
        SiteType::BulkingBreak => return None,
    };
    Some(Activity {
        site: site.clone(),
        activity_type,
        deliveries: deliveries
            .iter()
            .filter(|d| d.origin == site.uid || d.destination == site.uid)
            .cloned()
            .collect(),
        status: activity_status(&site.uid, status_updates),
    })
}

/// Arrival at and departure from a break site, for display.
pub fn break_activities(meta: &BreakMetadata) -> [Activity; 2] {
    let status = |done: bool| if done { ActivityStatus::Done } else { ActivityStatus::NotStarted };
    [
        Activity {
            site: meta.break_site.clone(),
            activity_type: ActivityType::BulkingBreakStart,
            deliveries: vec![],
            status: status(meta.break_is_done),
        },
        Activity {
            site: meta.break_site.clone(),
            activity_type: ActivityType::BulkingBreakEnd,
            deliveries: vec![],
            status: status(meta.resume_is_done),
        },
    ]
}

/// The group's activities framed by the break stops around it.
pub fn group_timeline(group: &MeanGroup, activities: &[Activity], transport: &Transport) -> Vec<Activity> {
    let mut timeline = Vec::with_capacity(activities.len() + 2);
    if let Some(site) = &group.break_before {
        let meta = break_metadata(&transport.segments, &transport.status_updates, site);
        let [_, resume] = break_activities(&meta);
        timeline.push(resume);
    }
    timeline.extend_from_slice(activities);
    if let Some(site) = &group.break_after {
        let meta = break_metadata(&transport.segments, &transport.status_updates, site);
        let [arrival, _] = break_activities(&meta);
        timeline.push(arrival);
    }
    timeline
}

fn new_group(index: usize, driving: Option<&Segment>, break_before: Option<Site>) -> MeanGroup {
    MeanGroup {
        index,
        trucker: driving.and_then(|s| s.trucker.clone()),
        vehicle: driving.and_then(|s| s.vehicle.clone()),
        activities: vec![],
        break_before,
        break_after: None,
    }
}

/// Split the transport's activities into mean groups, in journey order.
pub fn mean_groups(transport: &Transport) -> Vec<MeanGroup> {
    let segments = &transport.segments;
    let Some(first) = segments.first() else {
        return vec![];
    };

    let mut groups: Vec<MeanGroup> = Vec::new();
    let mut current = new_group(0, Some(first), None);

    // path[i] is the origin of segments[i]; the last entry is the final destination.
    let path = std::iter::once(&first.origin).chain(segments.iter().map(|s| &s.destination));
    for (i, site) in path.enumerate() {
        if site.is_break() {
            current.break_after = Some(site.clone());
            let next = new_group(0, segments.get(i), Some(site.clone()));
            let finished = std::mem::replace(&mut current, next);
            if !finished.activities.is_empty() || finished.break_before.is_some() {
                groups.push(finished);
            }
            continue;
        }
        if current.activities.iter().any(|a| a.site.uid == site.uid) {
            continue;
        }
        if let Some(activity) = activity_for_site(site, &transport.deliveries, &transport.status_updates) {
            current.activities.push(activity);
        }
    }
    if !current.activities.is_empty() || current.break_before.is_some() {
        groups.push(current);
    }

    for (i, group) in groups.iter_mut().enumerate() {
        group.index = i;
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::services::test_support::*;

    fn update(update_type: StatusUpdateType, site: &str) -> StatusUpdate {
        StatusUpdate {
            uid: format!("{}-{:?}", site, update_type),
            update_type,
            site: Some(site.to_string()),
            segment: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn status_follows_most_advanced_update() {
        let updates = vec![
            update(StatusUpdateType::Arrived, "A"),
            update(StatusUpdateType::LoadingComplete, "B"),
            update(StatusUpdateType::Arrived, "B"),
        ];
        assert_eq!(activity_status("A", &updates), ActivityStatus::Started);
        assert_eq!(activity_status("B", &updates), ActivityStatus::Done);
        assert_eq!(activity_status("C", &updates), ActivityStatus::NotStarted);
    }

    #[test]
    fn activity_collects_touching_deliveries() {
        let a = site_loading("A");
        let deliveries = vec![delivery("d1", "A", "B"), delivery("d2", "C", "D"), delivery("d3", "A", "C")];
        let activity = activity_for_site(&a, &deliveries, &[]).unwrap();
        assert_eq!(activity.activity_type, ActivityType::Loading);
        let uids: Vec<&str> = activity.deliveries.iter().map(|d| d.uid.as_str()).collect();
        assert_eq!(uids, vec!["d1", "d3"]);
    }

    #[test]
    fn break_site_has_no_activity() {
        assert!(activity_for_site(&site_break("BRK"), &[], &[]).is_none());
    }

    #[test]
    fn single_group_without_breaks() {
        let a = site_loading("A");
        let b = site_unloading("B");
        let c = site_unloading("C");
        let t = transport(
            vec![driven_by(segment("s1", &a, &b), "tr1", "v1"), segment("s2", &b, &c)],
            vec![delivery("d1", "A", "B"), delivery("d2", "A", "C")],
        );
        let groups = mean_groups(&t);
        assert_eq!(groups.len(), 1);
        assert_eq!(site_uids(&groups[0].activities), vec!["A", "B", "C"]);
        assert_eq!(groups[0].trucker.as_ref().map(|r| r.uid.as_str()), Some("tr1"));
        assert!(groups[0].break_before.is_none());
        assert!(groups[0].break_after.is_none());
    }

    #[test]
    fn breaks_split_groups_and_carry_means() {
        let a = site_loading("A");
        let brk = site_break("BRK");
        let b = site_unloading("B");
        let c = site_unloading("C");
        let t = transport(
            vec![
                driven_by(segment("s1", &a, &brk), "tr1", "v1"),
                driven_by(segment("s2", &brk, &b), "tr2", "v2"),
                driven_by(segment("s3", &b, &c), "tr2", "v2"),
            ],
            vec![delivery("d1", "A", "B"), delivery("d2", "A", "C")],
        );
        let groups = mean_groups(&t);
        assert_eq!(groups.len(), 2);
        assert_eq!(site_uids(&groups[0].activities), vec!["A"]);
        assert_eq!(groups[0].break_after.as_ref().map(|s| s.uid.as_str()), Some("BRK"));
        assert_eq!(site_uids(&groups[1].activities), vec!["B", "C"]);
        assert_eq!(groups[1].index, 1);
        assert_eq!(groups[1].break_before.as_ref().map(|s| s.uid.as_str()), Some("BRK"));
        assert_eq!(groups[1].vehicle.as_ref().map(|r| r.uid.as_str()), Some("v2"));
    }

    #[test]
    fn break_activities_reflect_progress() {
        let a = site_loading("A");
        let brk = site_break("BRK");
        let b = site_unloading("B");
        let segments = vec![segment("s1", &a, &brk), segment("s2", &brk, &b)];
        let updates = vec![update(StatusUpdateType::BulkingBreakStarted, "BRK")];
        let meta = break_metadata(&segments, &updates, &brk);
        let [start, end] = break_activities(&meta);
        assert_eq!(start.activity_type, ActivityType::BulkingBreakStart);
        assert_eq!(start.status, ActivityStatus::Done);
        assert_eq!(end.activity_type, ActivityType::BulkingBreakEnd);
        assert_eq!(end.status, ActivityStatus::NotStarted);
    }

    #[test]
    fn timeline_frames_group_with_break_stops() {
        let a = site_loading("A");
        let brk = site_break("BRK");
        let b = site_unloading("B");
        let c = site_unloading("C");
        let t = transport(
            vec![segment("s1", &a, &brk), segment("s2", &brk, &b), segment("s3", &b, &c)],
            vec![delivery("d1", "A", "B")],
        );
        let groups = mean_groups(&t);

        let first = group_timeline(&groups[0], &groups[0].activities, &t);
        let types: Vec<ActivityType> = first.iter().map(|a| a.activity_type).collect();
        assert_eq!(types, vec![ActivityType::Loading, ActivityType::BulkingBreakStart]);

        let second = group_timeline(&groups[1], &groups[1].activities, &t);
        assert_eq!(second[0].activity_type, ActivityType::BulkingBreakEnd);
        assert_eq!(site_uids(&second), vec!["BRK", "B", "C"]);
    }

    #[test]
    fn empty_transport_has_no_groups() {
        assert!(mean_groups(&transport(vec![], vec![])).is_empty());
    }
}
