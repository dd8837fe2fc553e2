use serde::Deserialize;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// File name of the SQLite database inside the data directory.
pub const DATABASE_NAME: &str = "recipes.db";

/// Server configuration
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the database
    pub data_dir: PathBuf,
    /// Interface to listen on
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// HMAC secret for session tokens. Required.
    pub jwt_secret: String,
    /// Text generation backend
    pub ai: AiConfig,
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Base URL of an OpenAI-compatible API
    pub base_url: String,
    /// API key. Without one the AI routes fail with an internal error.
    pub api_key: Option<String>,
    pub model: String,
    /// Per-request timeout for generation calls
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("recipebox"),
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: String::new(),
            ai: AiConfig::default(),
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config_path =
            config_path.or_else(|| std::env::var("RECIPEBOX_CONFIG").ok().map(PathBuf::from));
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// Like [`Config::load`], reading overrides through `lookup` instead of
    /// the process environment.
    pub fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self::load_without_secret_with(config_path, lookup)?;
        if config.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingJwtSecret);
        }
        Ok(config)
    }

    /// Same resolution as [`Config::load`] but a missing JWT secret is not an
    /// error. For tools that only need the storage location.
    pub fn load_without_secret(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config_path =
            config_path.or_else(|| std::env::var("RECIPEBOX_CONFIG").ok().map(PathBuf::from));
        Self::load_without_secret_with(config_path, |key| std::env::var(key).ok())
    }

    fn load_without_secret_with<F>(
        config_path: Option<PathBuf>,
        lookup: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            config = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;
        }

        if let Some(dir) = lookup("RECIPEBOX_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(host) = lookup("RECIPEBOX_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("RECIPEBOX_PORT") {
            config.port = parse_var("RECIPEBOX_PORT", &port)?;
        }
        if let Some(secret) = lookup("RECIPEBOX_JWT_SECRET") {
            config.jwt_secret = secret;
        }
        if let Some(url) = lookup("RECIPEBOX_AI_BASE_URL") {
            config.ai.base_url = url;
        }
        if let Some(key) = lookup("RECIPEBOX_AI_API_KEY") {
            config.ai.api_key = Some(key);
        }
        if let Some(model) = lookup("RECIPEBOX_AI_MODEL") {
            config.ai.model = model;
        }
        if let Some(secs) = lookup("RECIPEBOX_AI_TIMEOUT_SECS") {
            config.ai.timeout_secs = parse_var("RECIPEBOX_AI_TIMEOUT_SECS", &secs)?;
        }

        if config.ai.api_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
            config.ai.api_key = None;
        }

        Ok(config)
    }

    /// Default config file path: ~/.config/recipebox/config.yaml
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("recipebox")
            .join("config.yaml")
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_NAME)
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|_| ConfigError::InvalidValue("listen address".to_string(), addr))
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(name.to_string(), value.to_string()))
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("data_dir", &self.data_dir)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("ai", &self.ai)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("enabled", &self.api_key.is_some())
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {err}", path = .0.display(), err = .1)]
    ReadError(PathBuf, std::io::Error),
    #[error("Failed to parse config file '{path}': {err}", path = .0.display(), err = .1)]
    ParseError(PathBuf, serde_yaml::Error),
    #[error("Invalid value for {0}: '{1}'")]
    InvalidValue(String, String),
    #[error("RECIPEBOX_JWT_SECRET must be set")]
    MissingJwtSecret,
}
