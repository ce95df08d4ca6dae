//! Rebuild the transport's segment array from a reordered leg.
//!
//! The leg runs from the segment leaving the previous break (or the first
//! segment) to the segment arriving at the next break (or the last segment).
//! Segments outside the leg are copied unchanged. Segment uids inside the leg
//! are reused by position, so an unchanged order yields unchanged uids.

use crate::services::segment_partition::partition;
use crate::types::{Activity, BreakMetadata, DateRange, Segment};

/// Breaks delimiting the reordered leg.
#[derive(Debug, Clone, Default)]
pub struct LegBounds {
    pub previous_break: Option<BreakMetadata>,
    pub next_break: Option<BreakMetadata>,
}

/// Index range of the leg inside `segments`.
fn leg_range(segments: &[Segment], leg: &LegBounds) -> (usize, usize) {
    let previous = partition(segments, leg.previous_break.as_ref().map(|m| &m.break_site));
    let start = match (previous.from_break_index, previous.to_break_index) {
        (Some(f), _) => f,
        (None, Some(t)) => t + 1,
        (None, None) => 0,
    };

    let next = partition(segments, leg.next_break.as_ref().map(|m| &m.break_site));
    let end = match (next.to_break_index, next.from_break_index) {
        (Some(t), _) => t + 1,
        (None, Some(f)) => f,
        (None, None) => segments.len(),
    };

    let end = end.min(segments.len());
    (start.min(end), end)
}

fn date_at(dates: &[Option<DateRange>], i: usize) -> Option<DateRange> {
    dates.get(i).copied().flatten()
}

/// Full segment array for the reordered `activities` of one leg.
///
/// `dates` is index-aligned with `activities` (see `schedule_reconciler`).
/// Positions that had no segment before get an empty uid so the backend
/// creates them.
pub fn rebuild(
    activities: &[Activity],
    dates: &[Option<DateRange>],
    original_segments: &[Segment],
    leg: &LegBounds,
) -> Vec<Segment> {
    let (Some(first), Some(last)) = (activities.first(), activities.last()) else {
        return original_segments.to_vec();
    };

    let (start, end) = leg_range(original_segments, leg);
    let leg_segments = &original_segments[start..end];
    let from_break = leg
        .previous_break
        .as_ref()
        .and_then(|m| m.segment_from_break_site.as_ref());
    let to_break = leg
        .next_break
        .as_ref()
        .and_then(|m| m.segment_to_break_site.as_ref());
    let offset = usize::from(from_break.is_some());

    let mut rebuilt: Vec<Segment> = Vec::with_capacity(original_segments.len());
    rebuilt.extend_from_slice(&original_segments[..start]);

    if let Some(from) = from_break {
        rebuilt.push(Segment {
            destination: first.site.clone(),
            scheduled_end_range: date_at(dates, 0),
            ..from.clone()
        });
    }

    for (i, pair) in activities.windows(2).enumerate() {
        let template = leg_segments.get(offset + i).or(leg_segments.get(offset));
        rebuilt.push(Segment {
            uid: leg_segments
                .get(offset + i)
                .map(|s| s.uid.clone())
                .unwrap_or_default(),
            origin: pair[0].site.clone(),
            destination: pair[1].site.clone(),
            scheduled_start_range: date_at(dates, i),
            scheduled_end_range: date_at(dates, i + 1),
            trucker: template.and_then(|s| s.trucker.clone()),
            vehicle: template.and_then(|s| s.vehicle.clone()),
            trailers: template.map(|s| s.trailers.clone()).unwrap_or_default(),
        });
    }

    if let Some(to) = to_break {
        rebuilt.push(Segment {
            origin: last.site.clone(),
            scheduled_start_range: date_at(dates, activities.len() - 1),
            ..to.clone()
        });
    }

    rebuilt.extend_from_slice(&original_segments[end..]);
    rebuilt
}
