use std::sync::Arc;
use anyhow::{anyhow, Result};

use packpal_llm::ChatClient;
use packpal_persist::{Checkpointer, InMemoryCheckpointer};
use packpal_tools::ToolRegistry;
use packpal_types::{GraphConfig, LLMConfig};

use crate::graph::Graph;
use crate::nodes::{LLMNode, ToolNode};
use crate::prompt::SYSTEM_PROMPT;
use crate::router::{Router, SimpleRouter};

/// Builder for constructing a Graph with optional components
pub struct GraphBuilder {
    llm_client: Option<Arc<dyn ChatClient>>,
    registry: Option<ToolRegistry>,
    checkpointer: Option<Arc<dyn Checkpointer>>,
    router: Option<Arc<dyn Router>>,
    config: GraphConfig,
    llm_config: LLMConfig,
    system_prompt: Option<String>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            llm_client: None,
            registry: None,
            checkpointer: None,
            router: None,
            config: GraphConfig::default(),
            llm_config: LLMConfig::default(),
            system_prompt: None,
        }
    }

    /// Set the LLM client (required)
    pub fn llm_client(mut self, client: Arc<dyn ChatClient>) -> Self {
        self.llm_client = Some(client);
        self
    }

    /// Tools offered to the model; defaults to the full PackPal set
    pub fn tools(mut self, registry: ToolRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Checkpoint store; defaults to an in-memory one
    pub fn checkpointer(mut self, checkpointer: Arc<dyn Checkpointer>) -> Self {
        self.checkpointer = Some(checkpointer);
        self
    }

    pub fn router(mut self, router: Arc<dyn Router>) -> Self {
        self.router = Some(router);
        self
    }

    pub fn config(mut self, config: GraphConfig) -> Self {
        self.config = config;
        self
    }

    pub fn llm_config(mut self, llm_config: LLMConfig) -> Self {
        self.llm_config = llm_config;
        self
    }

    /// Override the instruction text
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Build the Graph
    pub fn build(self) -> Result<Graph> {
        let llm_client = self
            .llm_client
            .ok_or_else(|| anyhow!("LLM client is required"))?;

        if self.config.max_iterations == 0 {
            return Err(anyhow!("max_iterations must be at least 1"));
        }

        let registry = Arc::new(self.registry.unwrap_or_else(ToolRegistry::packpal));
        let system_prompt: Arc<str> = Arc::from(
            self.system_prompt
                .unwrap_or_else(|| SYSTEM_PROMPT.to_string()),
        );

        let llm_node = LLMNode::new(
            llm_client,
            Arc::clone(&registry),
            self.llm_config,
            Arc::clone(&system_prompt),
            self.config.llm_timeout,
        );
        let tool_node = ToolNode::new(registry);

        Ok(Graph::from_parts(
            Arc::new(llm_node),
            Arc::new(tool_node),
            self.router.unwrap_or_else(|| Arc::new(SimpleRouter)),
            self.checkpointer
                .unwrap_or_else(|| Arc::new(InMemoryCheckpointer::new())),
            self.config,
            system_prompt,
        ))
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
