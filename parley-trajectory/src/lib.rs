//! Reference trajectory recorders for Parley
//!
//! A trajectory is the ordered list of request/response events a chat
//! client emits. [`MemoryRecorder`] keeps them in memory for inspection;
//! [`FileRecorder`] appends them to a JSON-lines file.

pub mod recorder;

pub use parley_core::{TrajectoryError, TrajectoryEvent, TrajectoryRecorder};
pub use recorder::{FileRecorder, MemoryRecorder};

/// Result type for recorder operations
pub type TrajectoryResult<T> = Result<T, TrajectoryError>;
