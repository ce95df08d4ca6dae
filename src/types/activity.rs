//! Activity types derived from a transport's segments

use serde::{Deserialize, Serialize};

use super::{Delivery, Reference, Segment, Site};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Loading,
    Unloading,
    BulkingBreakStart,
    BulkingBreakEnd,
}

impl ActivityType {
    pub const fn as_str(self) -> &'static str {
        match self {
            ActivityType::Loading => "loading",
            ActivityType::Unloading => "unloading",
            ActivityType::BulkingBreakStart => "bulking_break_start",
            ActivityType::BulkingBreakEnd => "bulking_break_end",
        }
    }

    /// Only loading and unloading stops can be dragged.
    pub const fn is_draggable(self) -> bool {
        matches!(self, ActivityType::Loading | ActivityType::Unloading)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    NotStarted,
    Started,
    Done,
}

/// Presence at a site to load or unload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub site: Site,
    pub activity_type: ActivityType,
    /// Deliveries having this site as origin or destination
    pub deliveries: Vec<Delivery>,
    pub status: ActivityStatus,
}

impl Activity {
    pub fn site_uid(&self) -> &str {
        &self.site.uid
    }
}

/// Activities handled by one trucker/vehicle combination between two breaks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeanGroup {
    pub index: usize,
    pub trucker: Option<Reference>,
    pub vehicle: Option<Reference>,
    pub activities: Vec<Activity>,
    /// Break site the group resumes from
    pub break_before: Option<Site>,
    /// Break site the group ends at
    pub break_after: Option<Site>,
}

/// Progress of the journey around one break site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakMetadata {
    pub break_site: Site,
    pub break_is_done: bool,
    pub resume_is_done: bool,
    pub segment_to_break_site: Option<Segment>,
    pub segment_from_break_site: Option<Segment>,
}
