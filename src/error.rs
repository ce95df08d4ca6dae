//! Reorder error types.
//!
//! Pure reorder functions return `ReorderError`; handlers map it to a stable
//! NATS error code with [`ReorderError::code`].

use thiserror::Error;

/// Loading/unloading ordering rule broken by a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PrecedenceViolation {
    #[error("an unloading activity cannot be placed before its loading activity")]
    UnloadingBeforeLoading,

    #[error("a loading activity cannot be placed after its unloading activity")]
    LoadingAfterUnloading,
}

impl PrecedenceViolation {
    pub const fn rule(self) -> &'static str {
        match self {
            PrecedenceViolation::UnloadingBeforeLoading => "unloading-before-loading",
            PrecedenceViolation::LoadingAfterUnloading => "loading-after-unloading",
        }
    }
}

/// Failure talking to the transport REST API
#[derive(Debug, Error)]
pub enum TransportApiError {
    #[error("transport {0} not found")]
    NotFound(String),

    #[error("transport API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("transport API request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum ReorderError {
    #[error(transparent)]
    Precedence(#[from] PrecedenceViolation),

    #[error("{activity_type} activities cannot be moved")]
    NotDraggable { activity_type: &'static str },

    #[error("site {0} belongs to a prepared trip and cannot be moved")]
    FrozenTrip(String),

    #[error("activity at site {0} has already started")]
    ActivityLocked(String),

    #[error("index {index} out of range for {len} activities")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("mean group {0} not found")]
    GroupNotFound(usize),

    #[error("a reorder of transport {0} is already in progress")]
    ReorderInProgress(String),

    #[error("failed to persist segments and to reload transport: {0}")]
    PersistenceFailure(#[source] TransportApiError),

    #[error(transparent)]
    TransportApi(#[from] TransportApiError),
}

impl ReorderError {
    pub const fn code(&self) -> &'static str {
        match self {
            ReorderError::Precedence(_) => "PRECEDENCE_VIOLATION",
            ReorderError::NotDraggable { .. } => "NOT_DRAGGABLE",
            ReorderError::FrozenTrip(_) => "FROZEN_TRIP",
            ReorderError::ActivityLocked(_) => "ACTIVITY_LOCKED",
            ReorderError::IndexOutOfRange { .. } => "INDEX_OUT_OF_RANGE",
            ReorderError::GroupNotFound(_) => "GROUP_NOT_FOUND",
            ReorderError::ReorderInProgress(_) => "REORDER_IN_PROGRESS",
            ReorderError::PersistenceFailure(_) => "PERSISTENCE_FAILURE",
            ReorderError::TransportApi(_) => "TRANSPORT_API_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_message_and_code() {
        let err = ReorderError::from(PrecedenceViolation::UnloadingBeforeLoading);
        assert_eq!(err.code(), "PRECEDENCE_VIOLATION");
        assert_eq!(
            err.to_string(),
            "an unloading activity cannot be placed before its loading activity"
        );
    }

    #[test]
    fn test_rule_names() {
        assert_eq!(PrecedenceViolation::UnloadingBeforeLoading.rule(), "unloading-before-loading");
        assert_eq!(PrecedenceViolation::LoadingAfterUnloading.rule(), "loading-after-unloading");
    }
}
