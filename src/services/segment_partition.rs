//! Partition of a transport's segments around a break site.

use tracing::warn;

use crate::types::{Segment, Site};

/// Segments split around one break site.
///
/// All slices borrow from the input; `before ++ [to_break] ++ [from_break] ++ after`
/// is the original sequence whenever both break segments are found and adjacent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentPartition<'a> {
    pub before: &'a [Segment],
    pub to_break: Option<&'a Segment>,
    pub from_break: Option<&'a Segment>,
    pub after: &'a [Segment],
    pub to_break_index: Option<usize>,
    pub from_break_index: Option<usize>,
}

impl<'a> SegmentPartition<'a> {
    fn unbroken(segments: &'a [Segment]) -> Self {
        Self {
            before: &[],
            to_break: None,
            from_break: None,
            after: segments,
            to_break_index: None,
            from_break_index: None,
        }
    }
}

/// Split `segments` around `break_site`.
///
/// A break site that no segment touches is logged and treated as no break.
pub fn partition<'a>(segments: &'a [Segment], break_site: Option<&Site>) -> SegmentPartition<'a> {
    let Some(break_site) = break_site else {
        return SegmentPartition::unbroken(segments);
    };

    let to_idx = segments
        .iter()
        .position(|s| s.destination.uid == break_site.uid);
    let from_idx = segments
        .iter()
        .position(|s| s.origin.uid == break_site.uid);

    let (before_end, after_start) = match (to_idx, from_idx) {
        (None, None) => {
            warn!(
                "Dangling break reference: site {} not found among {} segments",
                break_site.uid,
                segments.len()
            );
            return SegmentPartition::unbroken(segments);
        }
        (Some(t), Some(f)) => (t, f + 1),
        (Some(t), None) => (t, t + 1),
        (None, Some(f)) => (f, f + 1),
    };

    SegmentPartition {
        before: &segments[..before_end],
        to_break: to_idx.map(|i| &segments[i]),
        from_break: from_idx.map(|i| &segments[i]),
        after: &segments[after_start.min(segments.len())..],
        to_break_index: to_idx,
        from_break_index: from_idx,
    }
}
