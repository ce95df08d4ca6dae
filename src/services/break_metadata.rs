//! Break progress derived from the transport status log.

use crate::services::segment_partition::partition;
use crate::types::{BreakMetadata, Segment, Site, StatusUpdate, StatusUpdateType};

/// Compute [`BreakMetadata`] for `break_site`.
pub fn break_metadata(
    segments: &[Segment],
    status_updates: &[StatusUpdate],
    break_site: &Site,
) -> BreakMetadata {
    let p = partition(segments, Some(break_site));
    let to_uid = p.to_break.map(|s| s.uid.as_str());
    let from_uid = p.from_break.map(|s| s.uid.as_str());

    let concerns = |u: &StatusUpdate, segment_uid: Option<&str>| {
        u.refers_to_site(&break_site.uid) || segment_uid.is_some_and(|uid| u.refers_to_segment(uid))
    };

    let break_is_done = status_updates.iter().any(|u| {
        u.update_type == StatusUpdateType::BulkingBreakStarted && concerns(u, to_uid)
    });
    let resume_is_done = status_updates.iter().any(|u| {
        matches!(
            u.update_type,
            StatusUpdateType::BulkingBreakComplete | StatusUpdateType::Departed
        ) && concerns(u, from_uid)
    });

    BreakMetadata {
        break_site: break_site.clone(),
        break_is_done,
        resume_is_done,
        segment_to_break_site: p.to_break.cloned(),
        segment_from_break_site: p.from_break.cloned(),
    }
}
