//! Prelude module for convenient imports
//!
//! ```rust
//! use packpal::prelude::*;
//! ```

pub use crate::{
    Graph, GraphBuilder, GraphConfig, GraphError, LLMConfig, StreamEvent, TurnInput,
    AssistantState, ChatMessage, Item, Trip,
    ChatClient, OpenAIClient, OpenAIConfig, Message, ToolCall,
    ToolRegistry, Checkpointer, InMemoryCheckpointer,
};
