use packpal_persist::PersistError;
use thiserror::Error;

/// Fatal turn failure. Tool failures never reach this type.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Thread not found: {0}")]
    ThreadNotFound(String),

    #[error("Provider error: {0:#}")]
    Provider(#[source] anyhow::Error),

    #[error("Provider did not answer within {0} ms")]
    ProviderTimeout(u64),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistError),

    #[error("Checkpoint store did not answer within {0} ms")]
    PersistenceTimeout(u64),

    #[error("Max iterations ({0}) reached")]
    MaxIterations(usize),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Event consumer went away")]
    StreamClosed,
}

impl GraphError {
    /// Tag carried by `error` stream events
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::ThreadNotFound(_) => "thread_not_found",
            Self::Provider(_) => "provider",
            Self::ProviderTimeout(_) => "provider_timeout",
            Self::Persistence(_) => "persistence",
            Self::PersistenceTimeout(_) => "persistence_timeout",
            Self::MaxIterations(_) => "max_iterations",
            Self::Serialization(_) => "serialization",
            Self::StreamClosed => "stream_closed",
        }
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
