use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::{InsanityMeterError, Result};

pub const DEFAULT_MODEL: &str = "claude-3-opus-20240229";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_API_BASE: &str = "https://api.anthropic.com";
pub const DEFAULT_API_VERSION: &str = "2023-06-01";
pub const DEFAULT_LOG_LEVEL: &str = "insanity_meter=info,tower_http=info";
const MAX_TOKENS_CAP: u32 = 8192;

/// Main configuration structure loaded from insanity_meter.toml and environment variables
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub model: ModelSettings,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8787)),
        }
    }
}

/// How the model service is called
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ModelSettings {
    pub name: String,
    pub max_tokens: u32,
    pub api_base: String,
    pub api_version: String,
    /// Unset means the call may wait forever.
    pub timeout_ms: Option<u64>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            api_base: DEFAULT_API_BASE.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout_ms: None,
        }
    }
}

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    pub api_key: Option<String>,
}

impl RuntimeConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
        };
        // CLAUDE_API_KEY is the older name.
        let api_key = non_blank("ANTHROPIC_API_KEY").or_else(|| non_blank("CLAUDE_API_KEY"));
        Self { api_key }
    }
}

/// Load the dotenv file into the process environment.
///
/// `INSANITY_ENV_FILE` names the file; otherwise `./.env` is used. Variables
/// already set are left alone. Only the first call reads the file; later
/// calls return the same result.
pub fn load_env_file() -> Option<PathBuf> {
    static LOADED: OnceLock<Option<PathBuf>> = OnceLock::new();
    LOADED
        .get_or_init(|| load_env_file_with(|key| std::env::var(key).ok()))
        .clone()
}

fn load_env_file_with(lookup: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    match lookup("INSANITY_ENV_FILE") {
        Some(path) => match dotenvy::from_path(&path) {
            Ok(()) => Some(PathBuf::from(path)),
            Err(e) => {
                tracing::warn!("Could not load env file {}: {}", path, e);
                None
            }
        },
        None => dotenvy::dotenv().ok(),
    }
}

/// `INSANITY_METER_CONFIG`, or `insanity_meter.toml` in the working directory.
pub fn default_config_path() -> PathBuf {
    std::env::var("INSANITY_METER_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("insanity_meter.toml"))
}

impl Config {
    /// Load configuration from TOML file and environment variables.
    /// Uses `path`, else INSANITY_METER_CONFIG, else "insanity_meter.toml".
    /// The env file is loaded first either way.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        load_env_file();
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load_from(&default_config_path()),
        }
    }

    /// Load from an explicit TOML path, then apply process env overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content)?,
            Err(_) => {
                tracing::warn!("Config file {} not found, using defaults", path.display());
                Self::default()
            }
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply env overrides (env-first) using the given lookup.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(bind) = lookup("INSANITY_HTTP_BIND") {
            match bind.parse::<SocketAddr>() {
                Ok(addr) => self.server.bind = addr,
                Err(_) => tracing::warn!("Ignoring unparseable INSANITY_HTTP_BIND '{}'", bind),
            }
        }
        if let Some(model) = lookup("INSANITY_MODEL") {
            self.model.name = model;
        }
        if let Some(max_tokens) = lookup("INSANITY_MAX_TOKENS").and_then(|v| v.parse().ok()) {
            self.model.max_tokens = max_tokens;
        }
        if let Some(api_base) = lookup("INSANITY_API_BASE") {
            self.model.api_base = api_base;
        }
        if let Some(timeout) = lookup("INSANITY_MODEL_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
            self.model.timeout_ms = Some(timeout);
        }

        self.runtime = RuntimeConfig::from_lookup(&lookup);

        if self.runtime.api_key.is_none() {
            tracing::warn!(
                "No ANTHROPIC_API_KEY or CLAUDE_API_KEY set; /compare will fail until one is provided"
            );
        }
    }

    pub fn validate(&mut self) -> Result<()> {
        if self.model.max_tokens == 0 || self.model.max_tokens > MAX_TOKENS_CAP {
            let clamped = self.model.max_tokens.clamp(1, MAX_TOKENS_CAP);
            tracing::warn!(
                "max_tokens {} outside 1..={}, clamping to {}",
                self.model.max_tokens,
                MAX_TOKENS_CAP,
                clamped
            );
            self.model.max_tokens = clamped;
        }

        if !self.model.api_base.starts_with("http://") && !self.model.api_base.starts_with("https://")
        {
            return Err(InsanityMeterError::Config {
                message: format!(
                    "api_base '{}' must start with http:// or https://",
                    self.model.api_base
                ),
            });
        }
        let trimmed = self.model.api_base.trim_end_matches('/').to_string();
        self.model.api_base = trimmed;

        if self.model.name.trim().is_empty() {
            return Err(InsanityMeterError::Config {
                message: "model name must not be empty".to_string(),
            });
        }

        Ok(())
    }
}
