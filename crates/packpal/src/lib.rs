//! # PackPal
//!
//! Conversational packing assistant engine. A user message plus the latest
//! trip and packing-list snapshots go in; the engine alternates a model
//! decision step with a tool step until the model answers without tool calls,
//! checkpointing after every step and streaming each intermediate state.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use packpal::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = Arc::new(OpenAIClient::new(std::env::var("OPENAI_API_KEY")?)?);
//!
//!     let graph = Graph::builder()
//!         .llm_client(client)
//!         .llm_config(LLMConfig::new("gpt-4o"))
//!         .build()?;
//!
//!     let trip = Trip::new("Hawaiian Getaway")
//!         .with_id(42)
//!         .with_dates("2025-08-10", "2025-08-17");
//!     let input = TurnInput::for_trip("start a list", trip, vec![]);
//!
//!     let mut events = graph.spawn_run(input);
//!     while let Some(event) = events.recv().await {
//!         match event {
//!             StreamEvent::Snapshot { message: Some(message), .. } => println!("{}", message.content),
//!             StreamEvent::Done { .. } | StreamEvent::Error { .. } => break,
//!             _ => {}
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`packpal-llm`**: message and tool types, `ChatClient`, OpenAI-compatible client
//! - **`packpal-types`**: assistant state, actions, reducers, stream events
//! - **`packpal-tools`**: the seven packing tools and their registry
//! - **`packpal-persist`**: checkpoint stores (in-memory, MongoDB behind `mongodb`)
//! - **`packpal-graph`**: decide/act engine, router, builder, SSE framing

pub mod prelude;

pub use packpal_graph::{
    streaming::to_sse_frame, Graph, GraphBuilder, GraphError, LLMNode, NextNode, Node, Router,
    SimpleRouter, ToolNode, SYSTEM_PROMPT,
};

pub use packpal_types::{
    Action, AssistantState, ChatMessage, ChatRole, GraphConfig, Item, LLMConfig, NodeType,
    PackingListAction, StateUpdate, StreamEvent, Trip, TripAction, TurnInput,
};

pub use packpal_llm::{
    ChatClient, ChatOptions, ChatRequest, ChatResponse, Content, Message, OpenAIClient,
    OpenAIConfig, ScriptedClient, Tool, ToolCall, ToolChoice,
};

pub use packpal_tools::{PackingTool, ToolError, ToolOutcome, ToolRegistry, ToolResult, ToolView};

pub use packpal_persist::{Checkpoint, Checkpointer, InMemoryCheckpointer, PersistError};

#[cfg(feature = "mongodb")]
pub use packpal_persist::MongoCheckpointer;
