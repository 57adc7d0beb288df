use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use packpal_cli::{config::CheckpointBackend, handle_line, Config};
use packpal_graph::Graph;
use packpal_llm::OpenAIClient;
use packpal_persist::{Checkpointer, InMemoryCheckpointer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config);

    tracing::info!("Starting PackPal driver");
    tracing::info!(
        "Model {} via {}",
        config.llm.model,
        config.openai_config().base_url()
    );

    let llm_client = Arc::new(OpenAIClient::from_config(config.openai_config())?);
    let checkpointer = build_checkpointer(&config).await?;

    let graph = Graph::builder()
        .llm_client(llm_client)
        .checkpointer(checkpointer)
        .config(config.graph_config())
        .llm_config(config.llm_config())
        .build()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        handle_line(&graph, &line, &mut stdout).await?;
    }

    tracing::info!("Input closed, shutting down");
    Ok(())
}

async fn build_checkpointer(config: &Config) -> anyhow::Result<Arc<dyn Checkpointer>> {
    match config.checkpoint.backend {
        CheckpointBackend::Memory => {
            tracing::info!("Using in-memory checkpoints");
            Ok(Arc::new(InMemoryCheckpointer::new()))
        }
        CheckpointBackend::Mongodb => connect_mongo(config).await,
    }
}

#[cfg(feature = "mongodb")]
async fn connect_mongo(config: &Config) -> anyhow::Result<Arc<dyn Checkpointer>> {
    let uri = config.mongodb_uri.as_deref().ok_or_else(|| {
        anyhow::anyhow!("MONGODB_URI environment variable is required for the mongodb backend")
    })?;

    tracing::info!("Connecting to MongoDB");
    let checkpointer =
        packpal_persist::MongoCheckpointer::connect(uri, &config.checkpoint.database).await?;
    tracing::info!("MongoDB connected");

    Ok(Arc::new(checkpointer))
}

#[cfg(not(feature = "mongodb"))]
async fn connect_mongo(_config: &Config) -> anyhow::Result<Arc<dyn Checkpointer>> {
    anyhow::bail!("checkpoint backend 'mongodb' requires building with the `mongodb` feature")
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    // stdout carries the event frames
    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
}
