use config::{Config as ConfigLoader, ConfigError, File};
use packpal_llm::OpenAIConfig;
use packpal_types::{GraphConfig, LLMConfig};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Environment variables layered over the TOML files
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("LLM_MODEL", "llm.model"),
    ("LLM_TEMPERATURE", "llm.temperature"),
    ("LLM_MAX_TOKENS", "llm.max_tokens"),
    ("LLM_BASE_URL", "llm.base_url"),
    ("GRAPH_MAX_ITERATIONS", "graph.max_iterations"),
    ("GRAPH_LLM_TIMEOUT_MS", "graph.llm_timeout_ms"),
    ("CHECKPOINT_BACKEND", "checkpoint.backend"),
    ("CHECKPOINT_DATABASE", "checkpoint.database"),
    ("CHECKPOINT_TIMEOUT_MS", "checkpoint.timeout_ms"),
    ("LOG_LEVEL", "logging.level"),
    ("LOG_FORMAT", "logging.format"),
];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub graph: GraphSettings,
    #[serde(default)]
    pub checkpoint: CheckpointSettings,
    #[serde(default)]
    pub logging: LoggingConfig,

    // Secrets (from ENV only)
    #[serde(skip_deserializing)]
    pub openai_api_key: String,
    #[serde(skip_deserializing)]
    pub mongodb_uri: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    /// OpenAI-compatible endpoint; the OpenAI API when unset
    pub base_url: Option<String>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        let defaults = LLMConfig::default();
        Self {
            model: defaults.model,
            temperature: defaults.temperature,
            max_tokens: defaults.max_tokens,
            base_url: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GraphSettings {
    pub max_iterations: usize,
    pub llm_timeout_ms: u64,
}

impl Default for GraphSettings {
    fn default() -> Self {
        let defaults = GraphConfig::default();
        Self {
            max_iterations: defaults.max_iterations,
            llm_timeout_ms: defaults.llm_timeout.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckpointBackend {
    Memory,
    Mongodb,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CheckpointSettings {
    pub backend: CheckpointBackend,
    pub database: String,
    pub timeout_ms: u64,
}

impl Default for CheckpointSettings {
    fn default() -> Self {
        Self {
            backend: CheckpointBackend::Memory,
            database: "packpal".to_string(),
            timeout_ms: GraphConfig::default().checkpoint_timeout.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables (LLM_, GRAPH_, CHECKPOINT_, LOG_ prefixes)
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let mut builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false));

        for (var, key) in ENV_OVERRIDES {
            builder = builder.set_override_option(*key, std::env::var(var).ok())?;
        }

        let mut cfg: Config = builder.build()?.try_deserialize()?;

        cfg.openai_api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            ConfigError::Message("OPENAI_API_KEY environment variable is required".to_string())
        })?;
        cfg.mongodb_uri = std::env::var("MONGODB_URI").ok();

        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        ConfigLoader::builder()
            .add_source(File::from(path.as_ref()))
            .build()?
            .try_deserialize()
    }

    pub fn graph_config(&self) -> GraphConfig {
        GraphConfig::new()
            .with_max_iterations(self.graph.max_iterations)
            .with_llm_timeout(Duration::from_millis(self.graph.llm_timeout_ms))
            .with_checkpoint_timeout(Duration::from_millis(self.checkpoint.timeout_ms))
    }

    pub fn llm_config(&self) -> LLMConfig {
        LLMConfig {
            model: self.llm.model.clone(),
            temperature: self.llm.temperature,
            max_tokens: self.llm.max_tokens,
        }
    }

    pub fn openai_config(&self) -> OpenAIConfig {
        let config = OpenAIConfig::new(self.openai_api_key.clone());
        match &self.llm.base_url {
            Some(url) if !url.trim().is_empty() => config.with_base_url(url.clone()),
            _ => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_structure() {
        let toml = r#"
            [llm]
            model = "gpt-4o-mini"
            temperature = 0.2
            max_tokens = 2048
            base_url = "http://localhost:11434/v1"

            [graph]
            max_iterations = 12
            llm_timeout_ms = 30000

            [checkpoint]
            backend = "mongodb"
            database = "packpal_test"
            timeout_ms = 2000

            [logging]
            level = "debug"
            format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.checkpoint.backend, CheckpointBackend::Mongodb);
        assert_eq!(config.logging.format, "json");

        let graph = config.graph_config();
        assert_eq!(graph.max_iterations, 12);
        assert_eq!(graph.llm_timeout, Duration::from_secs(30));
        assert_eq!(graph.checkpoint_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = toml::from_str("[llm]\nmodel = \"gpt-4.1\"\n").unwrap();
        assert_eq!(config.llm.model, "gpt-4.1");
        assert_eq!(config.llm.temperature, LLMConfig::default().temperature);
        assert_eq!(config.graph.max_iterations, GraphConfig::default().max_iterations);
        assert_eq!(config.checkpoint.backend, CheckpointBackend::Memory);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_llm_config_conversion() {
        let mut config = Config::default();
        config.llm.temperature = None;
        let llm = config.llm_config();
        assert_eq!(llm.model, LLMConfig::default().model);
        assert_eq!(llm.temperature, None);
    }

    #[test]
    fn test_blank_base_url_falls_back() {
        let mut config = Config::default();
        config.openai_api_key = "k".to_string();
        config.llm.base_url = Some("  ".to_string());
        assert_eq!(config.openai_config().base_url(), packpal_llm::config::OPENAI_API_BASE);
    }
}
