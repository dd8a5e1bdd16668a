//! In-memory trajectory recorder

use crate::{TrajectoryEvent, TrajectoryRecorder, TrajectoryResult};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::trace;

/// Keeps every recorded event in memory
///
/// Clones share the same buffer, so a clone handed to a client can be
/// inspected through the original.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecorder {
    events: Arc<RwLock<Vec<TrajectoryEvent>>>,
}

impl MemoryRecorder {
    /// Create a new empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events, oldest first
    pub async fn events(&self) -> Vec<TrajectoryEvent> {
        self.events.read().await.clone()
    }

    /// Number of recorded events
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    /// Check if nothing was recorded
    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }

    /// Drop all recorded events
    pub async fn clear(&self) {
        self.events.write().await.clear();
    }
}

#[async_trait]
impl TrajectoryRecorder for MemoryRecorder {
    async fn record(&self, event: &TrajectoryEvent) -> TrajectoryResult<()> {
        trace!(provider = event.provider(), "Recording trajectory event in memory");
        self.events.write().await.push(event.clone());
        Ok(())
    }
}
