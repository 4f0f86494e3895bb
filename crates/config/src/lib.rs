//! Configuration loading, validation, and management for Driver's Friend.
//!
//! Loads configuration from `~/.driversfriend/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.driversfriend/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Knowledge Store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Content Retriever configuration
    #[serde(default)]
    pub retriever: RetrieverConfig,

    /// Conversation Memory configuration
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Static Knowledge Table configuration
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_true() -> bool {
    true
}
fn default_timeout_secs() -> u64 {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// "sqlite", "memory", or "none"
    #[serde(default = "default_store_backend")]
    pub backend: String,

    /// SQLite database path (ignored by other backends)
    #[serde(default = "default_store_path")]
    pub path: String,

    /// Per-call budget for store queries
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_store_backend() -> String {
    "sqlite".into()
}
fn default_store_path() -> String {
    AppConfig::config_dir()
        .join("regulations.db")
        .to_string_lossy()
        .into_owned()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_store_backend(),
            path: default_store_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrieverConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Budget for a single document fetch
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Bound on the supporting block appended after the direct answer
    #[serde(default = "default_max_summary_chars")]
    pub max_summary_chars: usize,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Sources in priority order; the first is the primary source
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceConfig>,
}

fn default_max_summary_chars() -> usize {
    2000
}
fn default_user_agent() -> String {
    concat!("driversfriend/", env!("CARGO_PKG_VERSION")).into()
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_secs: default_timeout_secs(),
            max_summary_chars: default_max_summary_chars(),
            user_agent: default_user_agent(),
            sources: default_sources(),
        }
    }
}

/// An external document source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Attribution name, e.g. "routetogermany.com"
    pub name: String,

    pub base_url: String,

    /// Prior trust; defaults by position (0.85 primary, 0.80 otherwise)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,

    /// Topic key → path under `base_url`
    #[serde(default)]
    pub topic_paths: BTreeMap<String, String>,

    /// Path used when a topic has no entry in `topic_paths`
    #[serde(default = "default_fallback_path")]
    pub fallback_path: String,
}

fn default_fallback_path() -> String {
    "/drivingingermany/city-driving".into()
}

pub const PRIMARY_SOURCE_CONFIDENCE: f32 = 0.85;
pub const SECONDARY_SOURCE_CONFIDENCE: f32 = 0.80;

impl SourceConfig {
    /// Confidence for the source at `position` in the configured order.
    pub fn effective_confidence(&self, position: usize) -> f32 {
        self.confidence.unwrap_or(if position == 0 {
            PRIMARY_SOURCE_CONFIDENCE
        } else {
            SECONDARY_SOURCE_CONFIDENCE
        })
    }
}

fn default_sources() -> Vec<SourceConfig> {
    let topic_paths = [
        ("speed_limit", "/drivingingermany/city-driving"),
        ("autobahn", "/drivingingermany/autobahn"),
        ("parking", "/drivingingermany/parking"),
        ("right_of_way", "/drivingingermany/right-of-way"),
        ("traffic_signs", "/drivingingermany/road-signs-germany"),
        ("alcohol_limit", "/drivingingermany/fines-on-violations"),
        ("license", "/drivingingermany/driving-license"),
        ("safety", "/drivingingermany/city-driving"),
        ("accident", "/drivingingermany/accident"),
        ("insurance", "/drivingingermany/insurance"),
        ("fines", "/drivingingermany/fines-on-violations"),
        ("tires", "/drivingingermany/tires-regulations"),
        ("environmental", "/drivingingermany/environmental-zone-germany"),
    ]
    .into_iter()
    .map(|(topic, path)| (topic.to_string(), path.to_string()))
    .collect();

    vec![SourceConfig {
        name: "routetogermany.com".into(),
        base_url: "https://routetogermany.com".into(),
        confidence: Some(PRIMARY_SOURCE_CONFIDENCE),
        topic_paths,
        fallback_path: default_fallback_path(),
    }]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// "memory" or "sqlite"
    #[serde(default = "default_memory_backend")]
    pub backend: String,

    #[serde(default = "default_memory_path")]
    pub path: String,

    /// Per-user cap, at most 20; oldest entries are evicted first
    #[serde(default = "default_max_messages")]
    pub max_messages: usize,

    /// Number of recent user messages inspected for topics
    #[serde(default = "default_topic_window")]
    pub topic_window: usize,
}

fn default_memory_backend() -> String {
    "memory".into()
}
fn default_memory_path() -> String {
    AppConfig::config_dir()
        .join("conversations.db")
        .to_string_lossy()
        .into_owned()
}
/// Upper bound for `memory.max_messages`; a user's log never holds more.
pub const MAX_MESSAGES_LIMIT: usize = 20;

fn default_max_messages() -> usize {
    MAX_MESSAGES_LIMIT
}
fn default_topic_window() -> usize {
    5
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            backend: default_memory_backend(),
            path: default_memory_path(),
            max_messages: default_max_messages(),
            topic_window: default_topic_window(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// TOML file replacing the built-in offline table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    8000
}
fn default_host() -> String {
    "127.0.0.1".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.driversfriend/config.toml).
    ///
    /// Environment variables override file values:
    /// - `DRIVERSFRIEND_STORE_BACKEND`
    /// - `DRIVERSFRIEND_STORE_PATH`
    /// - `DRIVERSFRIEND_PORT`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(backend) = std::env::var("DRIVERSFRIEND_STORE_BACKEND") {
            self.store.backend = backend;
        }
        if let Ok(path) = std::env::var("DRIVERSFRIEND_STORE_PATH") {
            self.store.path = path;
        }
        if let Ok(port) = std::env::var("DRIVERSFRIEND_PORT") {
            self.gateway.port = port.parse().map_err(|_| {
                ConfigError::ValidationError(format!("DRIVERSFRIEND_PORT is not a port: {port}"))
            })?;
        }
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".driversfriend")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.store.backend.as_str(), "sqlite" | "memory" | "none") {
            return Err(ConfigError::ValidationError(format!(
                "store.backend must be sqlite, memory or none (got '{}')",
                self.store.backend
            )));
        }
        if !matches!(self.memory.backend.as_str(), "sqlite" | "memory") {
            return Err(ConfigError::ValidationError(format!(
                "memory.backend must be sqlite or memory (got '{}')",
                self.memory.backend
            )));
        }
        if self.store.timeout_secs == 0 || self.retriever.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeouts must be greater than zero".into(),
            ));
        }
        if self.memory.max_messages == 0 || self.memory.topic_window == 0 {
            return Err(ConfigError::ValidationError(
                "memory.max_messages and memory.topic_window must be > 0".into(),
            ));
        }
        if self.memory.max_messages > MAX_MESSAGES_LIMIT {
            return Err(ConfigError::ValidationError(format!(
                "memory.max_messages must be at most {MAX_MESSAGES_LIMIT} (got {})",
                self.memory.max_messages
            )));
        }
        if self.retriever.max_summary_chars < 100 {
            return Err(ConfigError::ValidationError(
                "retriever.max_summary_chars must be at least 100".into(),
            ));
        }
        for source in &self.retriever.sources {
            if source.name.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "retriever source name must not be empty".into(),
                ));
            }
            if let Some(c) = source.confidence
                && !(0.0..=1.0).contains(&c)
            {
                return Err(ConfigError::ValidationError(format!(
                    "confidence for source '{}' must be between 0.0 and 1.0",
                    source.name
                )));
            }
        }
        Ok(())
    }

    /// Generate a default config TOML string (for the `init` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.gateway.port, 8000);
        assert_eq!(config.memory.max_messages, 20);
        assert_eq!(config.retriever.timeout_secs, 5);
    }

    #[test]
    fn default_source_is_primary() {
        let config = AppConfig::default();
        let source = &config.retriever.sources[0];
        assert_eq!(source.name, "routetogermany.com");
        assert_eq!(source.effective_confidence(0), 0.85);
        assert_eq!(
            source.topic_paths.get("parking").map(String::as_str),
            Some("/drivingingermany/parking")
        );
    }

    #[test]
    fn secondary_source_defaults_to_lower_confidence() {
        let source = SourceConfig {
            name: "adac.de".into(),
            base_url: "https://www.adac.de".into(),
            confidence: None,
            topic_paths: BTreeMap::new(),
            fallback_path: "/".into(),
        };
        assert_eq!(source.effective_confidence(1), 0.80);
        assert_eq!(source.effective_confidence(0), 0.85);
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.gateway.port, config.gateway.port);
        assert_eq!(parsed.retriever.sources.len(), 1);
    }

    #[test]
    fn invalid_backend_rejected() {
        let mut config = AppConfig::default();
        config.store.backend = "mongodb".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut config = AppConfig::default();
        config.retriever.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn memory_cap_above_limit_rejected() {
        let mut config = AppConfig::default();
        config.memory.max_messages = MAX_MESSAGES_LIMIT;
        assert!(config.validate().is_ok());
        config.memory.max_messages = MAX_MESSAGES_LIMIT + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_range_confidence_rejected() {
        let mut config = AppConfig::default();
        config.retriever.sources[0].confidence = Some(1.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        let config = result.unwrap();
        assert_eq!(config.store.backend, "sqlite");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[store]
backend = "memory"

[[retriever.sources]]
name = "primary.example"
base_url = "https://primary.example"

[[retriever.sources]]
name = "secondary.example"
base_url = "https://secondary.example"
[retriever.sources.topic_paths]
parking = "/parking"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.store.backend, "memory");
        assert_eq!(config.store.timeout_secs, 5);
        assert_eq!(config.retriever.sources.len(), 2);
        assert_eq!(config.retriever.sources[1].effective_confidence(1), 0.80);
        assert_eq!(config.memory.topic_window, 5);
    }

    #[test]
    fn unparsable_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "store = [").unwrap();
        match AppConfig::load_from(&path) {
            Err(ConfigError::ParseError { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected ParseError, got: {other:?}"),
        }
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("routetogermany.com"));
        assert!(toml_str.contains("8000"));
    }
}
