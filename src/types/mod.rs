//! Type definitions

pub mod activity;
pub mod messages;
pub mod reorder;
pub mod transport;

pub use activity::*;
pub use messages::*;
pub use reorder::*;
pub use transport::*;
