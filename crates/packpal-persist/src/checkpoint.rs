use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use packpal_types::{AssistantState, NodeType};
use serde::{Deserialize, Serialize};

/// Last saved position of a thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub thread_id: String,
    pub state: AssistantState,
    /// Node to run next; `None` once the turn finished
    #[serde(default)]
    pub next: Option<NodeType>,
    /// Node executions so far in the current turn
    #[serde(default)]
    pub step: usize,
    pub updated_at: DateTime<Utc>,
}

impl Checkpoint {
    pub fn new(
        thread_id: impl Into<String>,
        state: AssistantState,
        next: Option<NodeType>,
        step: usize,
    ) -> Self {
        Self {
            thread_id: thread_id.into(),
            state,
            next,
            step,
            updated_at: Utc::now(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.next.is_none()
    }
}

/// Keyed-by-thread checkpoint storage.
///
/// `save` overwrites the previous checkpoint of the thread; threads are never
/// deleted by the engine.
#[async_trait]
pub trait Checkpointer: Send + Sync {
    async fn load(&self, thread_id: &str) -> Result<Option<Checkpoint>>;

    async fn save(&self, checkpoint: &Checkpoint) -> Result<()>;
}
