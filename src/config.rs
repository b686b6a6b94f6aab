use crate::parameters::{AudienceLevel, MAX_WORD_COUNT, OutputFormat, PromptParameters, Tone};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Main configuration structure loaded from prompt_enhancer.toml and environment variables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub defaults: DefaultsConfig,
    pub storage: StorageConfig,
    pub server: ServerConfig,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

/// Parameters used when a caller (CLI flag, config) does not choose one
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub audience_level: AudienceLevel,
    pub tone: Tone,
    pub output_format: OutputFormat,
    pub word_count: u32,
}

/// Where saved prompts live
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// "sqlite" or "memory"
    pub backend: String,
    pub sqlite_path: PathBuf,
}

/// HTTP API settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub http_bind: SocketAddr,
    /// Default page size for listing saved prompts
    pub list_limit: usize,
    pub request_timeout_ms: u64,
}

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub log_level: String,
    pub bearer_token: Option<String>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        let params = PromptParameters::default();
        Self {
            audience_level: params.audience_level,
            tone: params.tone,
            output_format: params.output_format,
            word_count: params.word_count,
        }
    }
}

impl DefaultsConfig {
    pub fn parameters(&self) -> PromptParameters {
        PromptParameters {
            audience_level: self.audience_level,
            tone: self.tone,
            output_format: self.output_format,
            word_count: self.word_count,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            sqlite_path: default_sqlite_path(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_bind: SocketAddr::from(([127, 0, 0, 1], 8788)),
            list_limit: 20,
            request_timeout_ms: 10_000,
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: "prompt_enhancer=info".to_string(),
            bearer_token: None,
        }
    }
}

impl RuntimeConfig {
    /// Load runtime configuration from environment variables
    pub fn load_from_env() -> Self {
        let mut config = Self::default();
        if let Ok(level) = std::env::var("PE_LOG_LEVEL")
            && !level.trim().is_empty()
        {
            config.log_level = level;
        }
        config.bearer_token = std::env::var("PE_BEARER_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        config
    }
}

/// Load `.env` into the process environment. PE_ENV_FILE wins; otherwise ./.env if present.
/// Variables already set are left alone, so calling this more than once is harmless.
pub fn load_env_file() {
    if let Ok(env_path) = std::env::var("PE_ENV_FILE") {
        let _ = dotenvy::from_path(env_path);
    } else {
        let _ = dotenvy::from_path(".env");
    }
}

/// Parse one env override, naming the variable on failure.
fn parse_override<T>(name: &str, raw: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("{} '{}' is not valid: {}", name, raw, e))
}

fn default_sqlite_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("prompt-enhancer")
        .join("prompts.db")
}

impl Config {
    /// Load configuration from TOML file and environment variables
    /// Uses PROMPT_ENHANCER_CONFIG environment variable or defaults to "prompt_enhancer.toml"
    pub fn load() -> anyhow::Result<Self> {
        load_env_file();

        let config_path = std::env::var("PROMPT_ENHANCER_CONFIG")
            .unwrap_or_else(|_| "prompt_enhancer.toml".to_string());

        let mut config: Config = if let Ok(content) = std::fs::read_to_string(&config_path) {
            toml::from_str(&content)?
        } else {
            tracing::warn!("Config file {} not found, using defaults", config_path);
            Self::default()
        };

        config.apply_env_overrides()?;
        config.runtime = RuntimeConfig::load_from_env();
        config.validate()?;
        Ok(config)
    }

    /// Apply PE_* environment overrides (env-first)
    pub fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        if let Ok(bind) = std::env::var("PE_HTTP_BIND") {
            self.server.http_bind = parse_override("PE_HTTP_BIND", &bind)?;
            tracing::debug!("PE_HTTP_BIND env override applied");
        }
        if let Ok(backend) = std::env::var("PE_STORAGE_BACKEND") {
            self.storage.backend = backend.trim().to_lowercase();
            tracing::debug!("PE_STORAGE_BACKEND env override applied");
        }
        if let Ok(path) = std::env::var("PE_SQLITE_PATH") {
            self.storage.sqlite_path = PathBuf::from(path);
            tracing::debug!("PE_SQLITE_PATH env override applied");
        }
        if let Ok(words) = std::env::var("PE_DEFAULT_WORD_COUNT") {
            self.defaults.word_count = parse_override("PE_DEFAULT_WORD_COUNT", &words)?;
            tracing::debug!("PE_DEFAULT_WORD_COUNT env override applied");
        }
        if let Ok(limit) = std::env::var("PE_LIST_LIMIT") {
            self.server.list_limit = parse_override("PE_LIST_LIMIT", &limit)?;
            tracing::debug!("PE_LIST_LIMIT env override applied");
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        match self.storage.backend.as_str() {
            "sqlite" | "memory" => {}
            other => anyhow::bail!("storage backend must be 'sqlite' or 'memory', got '{}'", other),
        }
        if !(1..=MAX_WORD_COUNT).contains(&self.defaults.word_count) {
            anyhow::bail!(
                "default word_count must be between 1 and {}",
                MAX_WORD_COUNT
            );
        }
        if !(1..=200).contains(&self.server.list_limit) {
            anyhow::bail!("list_limit must be between 1 and 200");
        }
        if self.server.request_timeout_ms == 0 {
            anyhow::bail!("request_timeout_ms must be > 0");
        }
        Ok(())
    }
}
