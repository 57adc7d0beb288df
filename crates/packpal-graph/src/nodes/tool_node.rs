use crate::error::Result;
use crate::node::Node;
use async_trait::async_trait;
use packpal_llm::Message;
use packpal_tools::{ToolRegistry, ToolView};
use packpal_types::{AssistantState, NodeType, StateUpdate};
use std::sync::Arc;

/// Acting step: resolves every pending tool call, in request order
pub struct ToolNode {
    registry: Arc<ToolRegistry>,
}

impl ToolNode {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl Node for ToolNode {
    async fn execute(&self, state: &AssistantState) -> Result<StateUpdate> {
        let tool_calls = state.pending_tool_calls();
        if tool_calls.is_empty() {
            return Ok(StateUpdate::new());
        }

        let results = self
            .registry
            .execute_all(tool_calls, &ToolView::from_state(state));

        let mut update = StateUpdate::new();
        for result in results {
            tracing::info!(
                "TOOL_NODE: {} -> {}",
                result.tool_name,
                if result.is_error { "rejected" } else { "applied" }
            );
            update = update.message(Message::tool_result(result.call_id, result.content));
            if let Some(action) = result.action {
                update = update.action(action);
            }
        }

        Ok(update)
    }

    fn node_type(&self) -> NodeType {
        NodeType::Tool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packpal_llm::ToolCall;
    use packpal_types::Item;
    use serde_json::json;

    #[tokio::test]
    async fn test_results_follow_request_order() {
        let mut state = AssistantState::new();
        state.packing_list = vec![Item::new("Socks", 7)];
        state.messages.push(Message::ai_with_tools(
            None,
            vec![
                ToolCall::new("call_a", "update_item_quantity", json!({"item_name": "Socks", "new_quantity": 5})),
                ToolCall::new("call_b", "remove_item_from_packing_list", json!({"item_name": "Kayak"})),
            ],
        ));

        let update = ToolNode::new(Arc::new(ToolRegistry::packpal()))
            .execute(&state)
            .await
            .unwrap();

        let ids: Vec<_> = update
            .messages
            .iter()
            .map(|m| match m {
                Message::Tool { tool_call_id, .. } => tool_call_id.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(ids, vec!["call_a", "call_b"]);
        assert_eq!(update.actions.len(), 1);
        assert!(update.chat_history.is_empty());
    }

    #[tokio::test]
    async fn test_no_pending_calls_is_empty_update() {
        let update = ToolNode::new(Arc::new(ToolRegistry::packpal()))
            .execute(&AssistantState::new())
            .await
            .unwrap();
        assert!(update.is_empty());
    }
}
