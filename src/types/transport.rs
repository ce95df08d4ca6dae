//! Transport types (as served by the transport REST API)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Agreed time window for a departure or an arrival
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Grouping of sites that can be frozen once prepared
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub uid: String,
    #[serde(default, alias = "is_prepared")]
    pub is_prepared: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteType {
    Loading,
    Unloading,
    BulkingBreak,
}

/// A stop in the transport path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub uid: String,
    pub site_type: SiteType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip: Option<Trip>,
}

impl Site {
    pub fn is_break(&self) -> bool {
        self.site_type == SiteType::BulkingBreak
    }

    /// Sites of a prepared trip must keep their position.
    pub fn is_frozen(&self) -> bool {
        self.trip.as_ref().is_some_and(|t| t.is_prepared)
    }
}

/// Assignment reference (trucker, vehicle, trailer)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Directed edge of the transport route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Empty for segments the backend has not created yet
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uid: String,
    pub origin: Site,
    pub destination: Site,
    #[serde(default)]
    pub scheduled_start_range: Option<DateRange>,
    #[serde(default)]
    pub scheduled_end_range: Option<DateRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trucker: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<Reference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trailers: Vec<Reference>,
}

/// Goods moved from an origin site to a destination site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub uid: String,
    /// Site uid where the goods are loaded
    pub origin: String,
    /// Site uid where the goods are unloaded
    pub destination: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusUpdateType {
    Arrived,
    LoadingStarted,
    LoadingComplete,
    UnloadingStarted,
    UnloadingComplete,
    Departed,
    BulkingBreakStarted,
    BulkingBreakComplete,
    #[serde(other)]
    Other,
}

/// Entry of the transport status log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub uid: String,
    pub update_type: StatusUpdateType,
    /// Site uid the update refers to
    #[serde(default)]
    pub site: Option<String>,
    /// Segment uid the update refers to
    #[serde(default)]
    pub segment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl StatusUpdate {
    pub fn refers_to_site(&self, site_uid: &str) -> bool {
        self.site.as_deref() == Some(site_uid)
    }

    pub fn refers_to_segment(&self, segment_uid: &str) -> bool {
        self.segment.as_deref() == Some(segment_uid)
    }
}

/// Transport entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transport {
    pub uid: String,
    #[serde(default)]
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub deliveries: Vec<Delivery>,
    #[serde(default)]
    pub status_updates: Vec<StatusUpdate>,
}
