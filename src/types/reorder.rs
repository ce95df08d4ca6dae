//! Reorder request/response payloads

use serde::{Deserialize, Serialize};

use super::{Activity, Segment, Transport};

/// A drag-and-drop gesture inside one mean group.
///
/// A missing `to_index` means the drag was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderMove {
    #[serde(default)]
    pub group_index: usize,
    pub from_index: usize,
    #[serde(default)]
    pub to_index: Option<usize>,
}

/// Request payload for transport.reorder
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub transport_uid: String,
    #[serde(flatten)]
    pub movement: ReorderMove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReorderStatus {
    /// Nothing to do (cancelled drag or same position)
    Unchanged,
    /// The transport API accepted the new segments
    Applied,
    /// The transport API refused them; `transport` is the re-fetched state
    RolledBack,
}

/// Response payload for transport.reorder
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderResponse {
    pub status: ReorderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<Transport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Request payload for transport.reorder.preview
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderPreviewRequest {
    pub transport: Transport,
    #[serde(flatten)]
    pub movement: ReorderMove,
}

/// Response payload for transport.reorder.preview
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderPreviewResponse {
    pub changed: bool,
    /// Full segment array that would be sent to the transport API
    pub segments: Vec<Segment>,
    /// Activities of the moved group in their new order
    pub activities: Vec<Activity>,
    /// Same activities framed by the surrounding break stops
    pub timeline: Vec<Activity>,
}
