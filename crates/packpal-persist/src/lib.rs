pub mod error;
pub mod checkpoint;
pub mod memory;
pub mod dbs;

pub use error::{PersistError, Result};
pub use checkpoint::{Checkpoint, Checkpointer};
pub use memory::InMemoryCheckpointer;

#[cfg(feature = "mongodb")]
pub use dbs::mongo::MongoCheckpointer;
