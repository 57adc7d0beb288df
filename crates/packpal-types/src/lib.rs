pub mod domain;
pub mod actions;
pub mod reducers;
pub mod state;
pub mod config;
pub mod events;

pub use domain::{ChatMessage, ChatRole, Item, Trip};
pub use actions::{Action, PackingListAction, TripAction};
pub use reducers::{reduce_packing_list, reduce_trip};
pub use state::{AssistantState, NodeType, StateUpdate, TurnInput};
pub use config::{GraphConfig, LLMConfig};
pub use events::StreamEvent;
