//! Builders shared by service tests.

use chrono::{TimeZone, Utc};

use crate::types::{
    Activity, ActivityStatus, ActivityType, DateRange, Delivery, Reference, Segment, Site,
    SiteType, Transport,
};

fn site(uid: &str, site_type: SiteType) -> Site {
    Site {
        uid: uid.to_string(),
        site_type,
        name: None,
        trip: None,
    }
}

pub fn site_loading(uid: &str) -> Site {
    site(uid, SiteType::Loading)
}

pub fn site_unloading(uid: &str) -> Site {
    site(uid, SiteType::Unloading)
}

pub fn site_break(uid: &str) -> Site {
    site(uid, SiteType::BulkingBreak)
}

pub fn segment(uid: &str, origin: &Site, destination: &Site) -> Segment {
    Segment {
        uid: uid.to_string(),
        origin: origin.clone(),
        destination: destination.clone(),
        scheduled_start_range: None,
        scheduled_end_range: None,
        trucker: None,
        vehicle: None,
        trailers: vec![],
    }
}

pub fn scheduled(
    mut segment: Segment,
    start: Option<DateRange>,
    end: Option<DateRange>,
) -> Segment {
    segment.scheduled_start_range = start;
    segment.scheduled_end_range = end;
    segment
}

pub fn driven_by(mut segment: Segment, trucker: &str, vehicle: &str) -> Segment {
    segment.trucker = Some(Reference { uid: trucker.to_string(), name: None });
    segment.vehicle = Some(Reference { uid: vehicle.to_string(), name: None });
    segment
}

/// Window on 2024-01-01 from `h1:m1` to `h2:m2` UTC.
pub fn range(h1: u32, m1: u32, h2: u32, m2: u32) -> DateRange {
    DateRange {
        start: Utc.with_ymd_and_hms(2024, 1, 1, h1, m1, 0).unwrap(),
        end: Utc.with_ymd_and_hms(2024, 1, 1, h2, m2, 0).unwrap(),
    }
}

pub fn delivery(uid: &str, origin: &str, destination: &str) -> Delivery {
    Delivery {
        uid: uid.to_string(),
        origin: origin.to_string(),
        destination: destination.to_string(),
    }
}

pub fn activity(site: &Site, activity_type: ActivityType, deliveries: &[Delivery]) -> Activity {
    Activity {
        site: site.clone(),
        activity_type,
        deliveries: deliveries
            .iter()
            .filter(|d| d.origin == site.uid || d.destination == site.uid)
            .cloned()
            .collect(),
        status: ActivityStatus::NotStarted,
    }
}

pub fn transport(segments: Vec<Segment>, deliveries: Vec<Delivery>) -> Transport {
    Transport {
        uid: "t1".to_string(),
        segments,
        deliveries,
        status_updates: vec![],
    }
}

pub fn site_uids(activities: &[Activity]) -> Vec<&str> {
    activities.iter().map(|a| a.site.uid.as_str()).collect()
}

pub fn segment_uids(segments: &[Segment]) -> Vec<&str> {
    segments.iter().map(|s| s.uid.as_str()).collect()
}
