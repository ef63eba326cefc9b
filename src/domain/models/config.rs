//! Application configuration models.
//!
//! Loaded hierarchically by `infrastructure::config::ConfigLoader`:
//! programmatic defaults, then project YAML, then `GRIMOIRE_*` environment
//! variables.

use serde::{Deserialize, Serialize};

use super::chunk::ChunkerConfig;

/// Main configuration structure for grimoire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Workers AI capability configuration (embedding + completion)
    #[serde(default)]
    pub workers_ai: WorkersAiConfig,

    /// Vector index (Qdrant) configuration
    #[serde(default)]
    pub index: IndexConfig,

    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkerConfig,

    /// Retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Admin token guarding ingestion. When unset, ingestion is open.
    #[serde(default)]
    pub admin_token: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8787
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            admin_token: None,
        }
    }
}

/// Cloudflare Workers AI configuration, shared by the embedding and
/// completion adapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct WorkersAiConfig {
    /// Cloudflare account id
    #[serde(default)]
    pub account_id: String,

    /// API token. Falls back to `CLOUDFLARE_API_TOKEN` env var.
    #[serde(default)]
    pub api_token: Option<String>,

    /// REST base URL
    #[serde(default = "default_workers_ai_base_url")]
    pub base_url: String,

    /// Embedding model
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Expected embedding dimension
    #[serde(default = "default_embedding_dimension")]
    pub embedding_dimension: usize,

    /// Completion model
    #[serde(default = "default_completion_model")]
    pub completion_model: String,

    /// Request timeout in seconds
    #[serde(default = "default_ai_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_workers_ai_base_url() -> String {
    "https://api.cloudflare.com/client/v4".to_string()
}

fn default_embedding_model() -> String {
    "@cf/baai/bge-base-en-v1.5".to_string()
}

const fn default_embedding_dimension() -> usize {
    768
}

fn default_completion_model() -> String {
    "@cf/meta/llama-3.1-8b-instruct".to_string()
}

const fn default_ai_timeout_secs() -> u64 {
    60
}

impl Default for WorkersAiConfig {
    fn default() -> Self {
        Self {
            account_id: String::new(),
            api_token: None,
            base_url: default_workers_ai_base_url(),
            embedding_model: default_embedding_model(),
            embedding_dimension: default_embedding_dimension(),
            completion_model: default_completion_model(),
            timeout_secs: default_ai_timeout_secs(),
        }
    }
}

/// Vector index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct IndexConfig {
    /// Qdrant base URL, no trailing slash required
    #[serde(default)]
    pub url: String,

    /// Qdrant API key. Falls back to `QDRANT_API_KEY` env var.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Collection name
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Force the vector mode ("single" or "named") instead of probing
    #[serde(default)]
    pub vector_mode: Option<String>,

    /// Pin the vector name used in named mode
    #[serde(default)]
    pub vector_name: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_index_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_collection() -> String {
    "grimoire".to_string()
}

const fn default_index_timeout_secs() -> u64 {
    30
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: None,
            collection: default_collection(),
            vector_mode: None,
            vector_name: None,
            timeout_secs: default_index_timeout_secs(),
        }
    }
}

/// Retrieval configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetrievalConfig {
    /// Maximum matches requested from the index
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Minimum similarity score a match must reach
    #[serde(default = "default_score_threshold")]
    pub score_threshold: f32,

    /// Hard cap on assembled context length, in characters
    #[serde(default = "default_max_context_chars")]
    pub max_context_chars: usize,
}

const fn default_limit() -> usize {
    5
}

const fn default_score_threshold() -> f32 {
    0.2
}

const fn default_max_context_chars() -> usize {
    6000
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            score_threshold: default_score_threshold(),
            max_context_chars: default_max_context_chars(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
