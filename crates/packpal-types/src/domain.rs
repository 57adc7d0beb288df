use packpal_llm::Message;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trip snapshot as the caller sees it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// ISO `YYYY-MM-DD`, empty when unset
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

impl Trip {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_dates(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = start.into();
        self.end_date = end.into();
        self
    }
}

/// One packing-list entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Item {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            id: None,
            name: name.into(),
            quantity,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (quantity: {})", self.name, self.quantity)?;
        if let Some(notes) = self.notes.as_deref().filter(|n| !n.is_empty()) {
            write!(f, " - {}", notes)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    Tool,
}

/// Display record shown to the end user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }

    pub fn tool(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Tool,
            content: content.into(),
        }
    }

    /// Display form of a model-facing message; system turns have none
    pub fn from_message(message: &Message) -> Option<Self> {
        match message {
            Message::System { .. } => None,
            Message::Human { .. } => Some(Self::user(message.text())),
            Message::AI { .. } => Some(Self::assistant(message.text())),
            Message::Tool { .. } => Some(Self::tool(message.text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_display() {
        let item = Item::new("Socks", 7).with_notes("Wool");
        assert_eq!(item.to_string(), "Socks (quantity: 7) - Wool");
        assert_eq!(Item::new("Hat", 1).to_string(), "Hat (quantity: 1)");
    }

    #[test]
    fn test_trip_defaults_from_sparse_json() {
        let trip: Trip = serde_json::from_str(r#"{"id": 4, "name": "Maui"}"#).unwrap();
        assert_eq!(trip.id, Some(4));
        assert!(trip.start_date.is_empty());
        assert!(trip.description.is_none());
    }

    #[test]
    fn test_chat_message_from_system_is_none() {
        assert!(ChatMessage::from_message(&Message::system("rules")).is_none());
        assert_eq!(
            ChatMessage::from_message(&Message::tool_result("c", "ok")),
            Some(ChatMessage::tool("ok"))
        );
    }
}
