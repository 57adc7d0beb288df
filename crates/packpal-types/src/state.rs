use crate::actions::Action;
use crate::domain::{ChatMessage, Item, Trip};
use crate::reducers::{reduce_packing_list, reduce_trip};
use packpal_llm::{Message, ToolCall};
use serde::{Deserialize, Serialize};

/// Graph node kinds; also recorded in checkpoints as the node to run next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    #[serde(rename = "llm")]
    LLM,
    #[serde(rename = "tool")]
    Tool,
}

/// Per-thread conversation state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistantState {
    /// Model-facing log, append-only
    pub messages: Vec<Message>,
    /// Display log, append-only
    pub chat_history: Vec<ChatMessage>,
    pub trip: Trip,
    pub packing_list: Vec<Item>,
}

impl AssistantState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a node's update: logs append, actions go through the reducers in order
    pub fn apply(mut self, update: StateUpdate) -> Self {
        self.messages.extend(update.messages);
        self.chat_history.extend(update.chat_history);
        for action in &update.actions {
            self.apply_action(action);
        }
        self
    }

    pub fn apply_action(&mut self, action: &Action) {
        match action {
            Action::Trip(action) => {
                self.trip = reduce_trip(std::mem::take(&mut self.trip), action);
            }
            Action::PackingList(action) => {
                self.packing_list =
                    reduce_packing_list(std::mem::take(&mut self.packing_list), action);
            }
        }
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Tool calls of the trailing assistant message, if it requested any
    pub fn pending_tool_calls(&self) -> &[ToolCall] {
        self.last_message().map(Message::tool_calls).unwrap_or(&[])
    }

    pub fn has_pending_tool_calls(&self) -> bool {
        !self.pending_tool_calls().is_empty()
    }
}

/// What a node hands back to the engine
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateUpdate {
    pub messages: Vec<Message>,
    pub chat_history: Vec<ChatMessage>,
    pub actions: Vec<Action>,
}

impl StateUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn chat(mut self, entry: ChatMessage) -> Self {
        self.chat_history.push(entry);
        self
    }

    pub fn action(mut self, action: impl Into<Action>) -> Self {
        self.actions.push(action.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.chat_history.is_empty() && self.actions.is_empty()
    }
}

/// One user turn as submitted by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnInput {
    pub thread_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub message: String,
    #[serde(default)]
    pub trip: Trip,
    #[serde(default)]
    pub packing_list: Vec<Item>,
}

impl TurnInput {
    pub fn new(
        thread_id: impl Into<String>,
        message: impl Into<String>,
        trip: Trip,
        packing_list: Vec<Item>,
    ) -> Self {
        Self {
            thread_id: thread_id.into(),
            user_id: None,
            message: message.into(),
            trip,
            packing_list,
        }
    }

    /// Thread keyed by the trip id, empty when the trip has none
    pub fn for_trip(message: impl Into<String>, trip: Trip, packing_list: Vec<Item>) -> Self {
        let thread_id = trip.id.map(|id| id.to_string()).unwrap_or_default();
        Self::new(thread_id, message, trip, packing_list)
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}
