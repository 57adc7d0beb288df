use crate::domain::{ChatMessage, Item, Trip};
use crate::state::{AssistantState, NodeType};
use serde::{Deserialize, Serialize};

/// Event delivered to the caller while a turn runs.
///
/// A turn yields one `Snapshot` after the input bootstrap, one per executed
/// node, and then exactly one terminal event (`Done` or `Error`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// State after a graph step
    Snapshot {
        step: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        node: Option<NodeType>,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<ChatMessage>,
        trip: Trip,
        packing_list: Vec<Item>,
    },

    /// Turn completed
    Done {
        status: String,
        steps: usize,
        total_duration_ms: u64,
    },

    /// Fatal error, turn aborted
    Error {
        kind: String,
        message: String,
    },
}

impl StreamEvent {
    /// Snapshot of `state`; `message` is the display form of its newest turn
    pub fn snapshot(step: usize, node: Option<NodeType>, state: &AssistantState) -> Self {
        Self::Snapshot {
            step,
            node,
            message: state.last_message().and_then(ChatMessage::from_message),
            trip: state.trip.clone(),
            packing_list: state.packing_list.clone(),
        }
    }

    pub fn done(steps: usize, total_duration_ms: u64) -> Self {
        Self::Done {
            status: "success".to_string(),
            steps,
            total_duration_ms,
        }
    }

    pub fn error(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            kind: kind.into(),
            message: message.into(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done { .. } | Self::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packpal_llm::Message;
    use serde_json::json;

    #[test]
    fn test_snapshot_wire_shape() {
        let mut state = AssistantState::new();
        state.messages.push(Message::human("start a list"));

        let value = serde_json::to_value(StreamEvent::snapshot(0, None, &state)).unwrap();
        assert_eq!(value["type"], "snapshot");
        assert_eq!(value["message"], json!({"role": "user", "content": "start a list"}));
        assert!(value.get("node").is_none());
        assert_eq!(value["packing_list"], json!([]));
    }

    #[test]
    fn test_terminal_events() {
        assert!(StreamEvent::done(3, 10).is_terminal());
        assert!(StreamEvent::error("provider", "boom").is_terminal());
        assert!(!StreamEvent::snapshot(1, Some(NodeType::LLM), &AssistantState::new()).is_terminal());
    }
}
