//! Activity sequencing inside one mean group.
//!
//! A delivery's loading activity must always stay before its unloading
//! activity. `can_move` checks a gesture against that rule before anything
//! is mutated; `apply_move` performs the remove-then-insert.

use crate::error::{PrecedenceViolation, ReorderError};
use crate::types::{Activity, ActivityStatus, ActivityType};

/// What a validated gesture asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Cancelled drag or unchanged position
    NoOp,
    Move { from: usize, to: usize },
}

/// Validate moving `activities[from_index]` to `to_index`.
///
/// `to_index == None` is a cancelled drag and always succeeds as a no-op.
pub fn can_move(
    activities: &[Activity],
    from_index: usize,
    to_index: Option<usize>,
) -> Result<MoveOutcome, ReorderError> {
    let Some(to_index) = to_index else {
        return Ok(MoveOutcome::NoOp);
    };
    if to_index == from_index {
        return Ok(MoveOutcome::NoOp);
    }

    let len = activities.len();
    let moved = activities
        .get(from_index)
        .ok_or(ReorderError::IndexOutOfRange { index: from_index, len })?;
    if to_index >= len {
        return Err(ReorderError::IndexOutOfRange { index: to_index, len });
    }

    if !moved.activity_type.is_draggable() {
        return Err(ReorderError::NotDraggable {
            activity_type: moved.activity_type.as_str(),
        });
    }
    if moved.site.is_frozen() {
        return Err(ReorderError::FrozenTrip(moved.site.uid.clone()));
    }
    if moved.status != ActivityStatus::NotStarted {
        return Err(ReorderError::ActivityLocked(moved.site.uid.clone()));
    }

    let filtered: Vec<&Activity> = activities
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != from_index)
        .map(|(_, a)| a)
        .collect();

    match moved.activity_type {
        ActivityType::Unloading => {
            let loading_after = filtered[to_index..].iter().any(|a| {
                moved.deliveries.iter().any(|d| d.origin == a.site.uid)
            });
            if loading_after {
                return Err(PrecedenceViolation::UnloadingBeforeLoading.into());
            }
        }
        ActivityType::Loading => {
            let unloading_before = filtered[..to_index].iter().any(|a| {
                moved.deliveries.iter().any(|d| d.destination == a.site.uid)
            });
            if unloading_before {
                return Err(PrecedenceViolation::LoadingAfterUnloading.into());
            }
        }
        ActivityType::BulkingBreakStart | ActivityType::BulkingBreakEnd => {}
    }

    Ok(MoveOutcome::Move { from: from_index, to: to_index })
}

/// Move `activities[from]` to position `to`.
pub fn apply_move(activities: &mut Vec<Activity>, from: usize, to: usize) {
    let moved = activities.remove(from);
    activities.insert(to, moved);
}

/// Validate and apply in one step; returns the index the activity landed on.
pub fn try_move(
    activities: &mut Vec<Activity>,
    from_index: usize,
    to_index: Option<usize>,
) -> Result<Option<usize>, ReorderError> {
    match can_move(activities, from_index, to_index)? {
        MoveOutcome::NoOp => Ok(None),
        MoveOutcome::Move { from, to } => {
            apply_move(activities, from, to);
            Ok(Some(to))
        }
    }
}
