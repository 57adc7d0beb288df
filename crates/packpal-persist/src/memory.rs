use crate::checkpoint::{Checkpoint, Checkpointer};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local store; cloning shares the same map
#[derive(Clone, Default)]
pub struct InMemoryCheckpointer {
    checkpoints: Arc<RwLock<HashMap<String, Checkpoint>>>,
}

impl InMemoryCheckpointer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.checkpoints.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.checkpoints.read().await.is_empty()
    }
}

#[async_trait]
impl Checkpointer for InMemoryCheckpointer {
    async fn load(&self, thread_id: &str) -> Result<Option<Checkpoint>> {
        let checkpoints = self.checkpoints.read().await;
        Ok(checkpoints.get(thread_id).cloned())
    }

    async fn save(&self, checkpoint: &Checkpoint) -> Result<()> {
        let mut checkpoints = self.checkpoints.write().await;
        checkpoints.insert(checkpoint.thread_id.clone(), checkpoint.clone());
        tracing::debug!(
            "CHECKPOINT: saved thread={} step={} next={:?}",
            checkpoint.thread_id,
            checkpoint.step,
            checkpoint.next
        );
        Ok(())
    }
}
