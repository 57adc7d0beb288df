use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::{bson::doc, Client, Collection};
use packpal_types::{AssistantState, NodeType};
use serde::{Deserialize, Serialize};

use crate::checkpoint::{Checkpoint, Checkpointer};
use crate::error::{PersistError, Result};

/// One document per thread, keyed by the thread id
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MongoCheckpoint {
    #[serde(rename = "_id")]
    thread_id: String,
    state: AssistantState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    next: Option<NodeType>,
    step: i64,
    updated_at: DateTime<Utc>,
}

impl From<&Checkpoint> for MongoCheckpoint {
    fn from(checkpoint: &Checkpoint) -> Self {
        Self {
            thread_id: checkpoint.thread_id.clone(),
            state: checkpoint.state.clone(),
            next: checkpoint.next,
            step: i64::try_from(checkpoint.step).unwrap_or(i64::MAX),
            updated_at: checkpoint.updated_at,
        }
    }
}

impl From<MongoCheckpoint> for Checkpoint {
    fn from(doc: MongoCheckpoint) -> Self {
        Self {
            thread_id: doc.thread_id,
            state: doc.state,
            next: doc.next,
            step: usize::try_from(doc.step).unwrap_or_default(),
            updated_at: doc.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct MongoCheckpointer {
    collection: Collection<MongoCheckpoint>,
}

impl MongoCheckpointer {
    pub const COLLECTION: &'static str = "checkpoints";

    /// Connect to MongoDB and bind the checkpoints collection
    pub async fn connect(mongodb_uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(mongodb_uri)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;

        Ok(Self::new(&client, database))
    }

    pub fn new(client: &Client, database: &str) -> Self {
        let collection = client.database(database).collection(Self::COLLECTION);
        Self { collection }
    }
}

#[async_trait]
impl Checkpointer for MongoCheckpointer {
    async fn load(&self, thread_id: &str) -> Result<Option<Checkpoint>> {
        let filter = doc! { "_id": thread_id };
        let found = self.collection.find_one(filter).await?;
        Ok(found.map(Checkpoint::from))
    }

    async fn save(&self, checkpoint: &Checkpoint) -> Result<()> {
        let filter = doc! { "_id": checkpoint.thread_id.as_str() };
        let document = MongoCheckpoint::from(checkpoint);

        self.collection
            .replace_one(filter, &document)
            .upsert(true)
            .await?;

        tracing::debug!(
            "CHECKPOINT: upserted thread={} step={}",
            checkpoint.thread_id,
            checkpoint.step
        );
        Ok(())
    }
}
