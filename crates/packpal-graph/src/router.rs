use packpal_types::{AssistantState, NodeType};

/// Decides which node to execute next based on current state
pub trait Router: Send + Sync {
    fn next(&self, state: &AssistantState, current: NodeType) -> NextNode;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NextNode {
    LLM,
    Tool,
    End,
}

impl NextNode {
    /// Node to record in the checkpoint, `None` when the turn is over
    pub fn node(self) -> Option<NodeType> {
        match self {
            Self::LLM => Some(NodeType::LLM),
            Self::Tool => Some(NodeType::Tool),
            Self::End => None,
        }
    }
}

/// Decide -> act loop:
/// LLM -> Tool (if tool_calls present) -> LLM -> END
pub struct SimpleRouter;

impl Router for SimpleRouter {
    fn next(&self, state: &AssistantState, current: NodeType) -> NextNode {
        match current {
            NodeType::LLM => {
                if state.has_pending_tool_calls() {
                    NextNode::Tool
                } else {
                    NextNode::End
                }
            }
            NodeType::Tool => NextNode::LLM,
        }
    }
}
