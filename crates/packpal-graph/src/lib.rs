pub mod error;
pub mod node;
pub mod router;
pub mod nodes;
pub mod prompt;
pub mod graph;
pub mod builder;
pub mod streaming;

pub use error::GraphError;
pub use node::{EventSender, Node};
pub use router::{NextNode, Router, SimpleRouter};
pub use nodes::{LLMNode, ToolNode};
pub use graph::Graph;
pub use builder::GraphBuilder;
pub use prompt::SYSTEM_PROMPT;

// Re-export key types from packpal-types
pub use packpal_types::{
    AssistantState, ChatMessage, GraphConfig, LLMConfig, NodeType, StateUpdate, StreamEvent,
    TurnInput,
};
