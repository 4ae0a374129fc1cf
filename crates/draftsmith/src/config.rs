//! Configuration for the content-operations system

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Hosted LLM configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Business identity used in generation prompts
    #[serde(default)]
    pub business: BusinessConfig,
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file, falling back to defaults when the
    /// file does not exist. The LLM API key is always re-resolved from the
    /// environment afterwards; it is never read from the file itself.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path)?;
            toml::from_str(&raw)
                .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?
        } else {
            Self::default()
        };

        config.llm.resolve_api_key();
        Ok(config)
    }

    /// Default configuration with the API key resolved from the environment
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.llm.resolve_api_key();
        config
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum upload size in bytes (default: 10MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: true,
            max_upload_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

/// Hosted LLM configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API base URL
    pub base_url: String,
    /// Text generation model name
    pub text_model: String,
    /// Image generation model name
    pub image_model: String,
    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Resolved API key; populated from the environment, never from file
    #[serde(skip)]
    pub api_key: Option<String>,
    /// Temperature for generation
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Number of retries for failed requests
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            text_model: "gemini-2.5-flash".to_string(),
            image_model: "imagen-3.0-generate-002".to_string(),
            api_key_env: default_api_key_env(),
            api_key: None,
            temperature: 0.7,
            timeout_secs: 60,
            max_retries: 2,
        }
    }
}

impl LlmConfig {
    /// Resolve the API key from the configured environment variable
    pub fn resolve_api_key(&mut self) {
        self.api_key = std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty());
    }
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

/// Business identity woven into generation prompts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessConfig {
    /// Display name used in prompts (e.g. "Alta View Indoor Golf Club")
    pub name: String,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            name: "our business".to_string(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the SQLite database
    pub database_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let database_path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("draftsmith")
            .join("content.db");

        Self { database_path }
    }
}
