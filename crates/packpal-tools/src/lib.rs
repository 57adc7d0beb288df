pub mod error;
pub mod registry;
pub mod items;
pub mod trip;

pub use error::ToolError;
pub use registry::{PackingTool, ToolOutcome, ToolRegistry, ToolResult, ToolView};
pub use items::{AddItem, RemoveItem, UpdateItemNotes, UpdateItemQuantity};
pub use trip::{UpdateTripDates, UpdateTripDescription, UpdateTripName};
