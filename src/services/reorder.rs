//! Reorder planning and persistence.
//!
//! `plan_reorder` is the pure part: validate the gesture, apply it to the
//! group's activities, reconcile windows and rebuild the segment array.
//! `ReorderService` persists that array through the transport API. The
//! local plan is speculative: on failure the transport is re-fetched and the
//! server state is returned instead.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::error::ReorderError;
use crate::services::activities::mean_groups;
use crate::services::break_metadata::break_metadata;
use crate::services::schedule_reconciler::reconcile;
use crate::services::segment_rebuilder::{rebuild, LegBounds};
use crate::services::sequencer::try_move;
use crate::services::transport_api::TransportApi;
use crate::types::{Activity, ReorderMove, Segment, Transport};

/// Result of planning a gesture
#[derive(Debug, Clone, PartialEq)]
pub enum ReorderPlan {
    NoOp,
    Update {
        /// Full segment array for the transport update API
        segments: Vec<Segment>,
        /// Activities of the moved group, in their new order
        activities: Vec<Activity>,
    },
}

/// Plan `movement` against a snapshot of the transport.
pub fn plan_reorder(transport: &Transport, movement: &ReorderMove) -> Result<ReorderPlan, ReorderError> {
    let groups = mean_groups(transport);
    let group = groups
        .get(movement.group_index)
        .ok_or(ReorderError::GroupNotFound(movement.group_index))?;

    let mut activities = group.activities.clone();
    let Some(moved_to) = try_move(&mut activities, movement.from_index, movement.to_index)? else {
        return Ok(ReorderPlan::NoOp);
    };

    let dates = reconcile(&activities, &transport.segments, moved_to);
    let leg = LegBounds {
        previous_break: group
            .break_before
            .as_ref()
            .map(|site| break_metadata(&transport.segments, &transport.status_updates, site)),
        next_break: group
            .break_after
            .as_ref()
            .map(|site| break_metadata(&transport.segments, &transport.status_updates, site)),
    };
    let segments = rebuild(&activities, &dates, &transport.segments, &leg);

    debug!(
        "Planned reorder of transport {} group {}: {} -> {} ({} segments)",
        transport.uid,
        group.index,
        movement.from_index,
        moved_to,
        segments.len()
    );

    Ok(ReorderPlan::Update { segments, activities })
}

/// Outcome of a persisted reorder
#[derive(Debug, Clone, PartialEq)]
pub enum ReorderOutcome {
    /// Cancelled drag or same position; nothing was fetched or sent
    Unchanged,
    /// Segments accepted; canonical transport returned by the API
    Applied(Transport),
    /// Segments refused; transport re-fetched from the API
    RolledBack { transport: Transport, reason: String },
}

/// Removes the transport from the in-flight set when dropped.
struct InFlightGuard<'a> {
    in_flight: &'a Mutex<HashSet<String>>,
    uid: String,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.lock().remove(&self.uid);
    }
}

pub struct ReorderService {
    api: Arc<dyn TransportApi>,
    in_flight: Mutex<HashSet<String>>,
}

impl ReorderService {
    pub fn new(api: Arc<dyn TransportApi>) -> Self {
        Self {
            api,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    fn acquire(&self, uid: &str) -> Result<InFlightGuard<'_>, ReorderError> {
        let mut in_flight = self.in_flight.lock();
        if !in_flight.insert(uid.to_string()) {
            return Err(ReorderError::ReorderInProgress(uid.to_string()));
        }
        Ok(InFlightGuard {
            in_flight: &self.in_flight,
            uid: uid.to_string(),
        })
    }

    /// Plan without persisting.
    pub fn preview(&self, transport: &Transport, movement: &ReorderMove) -> Result<ReorderPlan, ReorderError> {
        plan_reorder(transport, movement)
    }

    /// Apply `movement` to the transport and persist the new segments.
    ///
    /// A second reorder of the same transport while one is in flight is
    /// refused, not queued.
    pub async fn reorder(
        &self,
        transport_uid: &str,
        movement: &ReorderMove,
    ) -> Result<ReorderOutcome, ReorderError> {
        if movement.to_index.is_none() || movement.to_index == Some(movement.from_index) {
            return Ok(ReorderOutcome::Unchanged);
        }

        let _guard = self.acquire(transport_uid)?;

        let transport = self.api.get_transport(transport_uid).await?;
        let segments = match plan_reorder(&transport, movement)? {
            ReorderPlan::NoOp => return Ok(ReorderOutcome::Unchanged),
            ReorderPlan::Update { segments, .. } => segments,
        };

        match self.api.update_segments(transport_uid, &segments).await {
            Ok(updated) => {
                info!(
                    "Transport {} reordered via {} ({} segments)",
                    transport_uid,
                    self.api.name(),
                    segments.len()
                );
                Ok(ReorderOutcome::Applied(updated))
            }
            Err(e) => {
                warn!("Transport {} segment update failed: {}. Reloading.", transport_uid, e);
                let transport = self
                    .api
                    .get_transport(transport_uid)
                    .await
                    .map_err(ReorderError::PersistenceFailure)?;
                Ok(ReorderOutcome::RolledBack {
                    transport,
                    reason: e.to_string(),
                })
            }
        }
    }
}
