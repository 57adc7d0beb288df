use crate::error::Result;
use async_trait::async_trait;
use packpal_types::{AssistantState, NodeType, StateUpdate, StreamEvent};
use tokio::sync::mpsc;

pub type EventSender = mpsc::Sender<StreamEvent>;

/// Unit of computation in the graph.
///
/// A node reads the current state and returns the update it wants applied;
/// the engine folds it, so an aborted node leaves nothing half-applied.
#[async_trait]
pub trait Node: Send + Sync {
    async fn execute(&self, state: &AssistantState) -> Result<StateUpdate>;

    fn node_type(&self) -> NodeType;
}
