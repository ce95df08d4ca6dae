//! Business logic services

pub mod activities;
pub mod break_metadata;
pub mod reorder;
pub mod schedule_reconciler;
pub mod segment_partition;
pub mod segment_rebuilder;
pub mod sequencer;
pub mod transport_api;

#[cfg(test)]
pub(crate) mod test_support;
