use crate::{
    CONFIG_PATH_ENV, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_PATH, DEFAULT_HOST,
    DEFAULT_IS_DEBUG, DEFAULT_PORT, DEFAULT_SHUTDOWN_GRACE_SECS, HandlerConfig, LoggingConfig,
    MAX_SHUTDOWN_GRACE_SECS, MIN_PORT, MIN_SHUTDOWN_GRACE_SECS, StorageConfig,
};

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{LevelFilter, info};
use serde::{Deserialize, Deserializer};

/// Application configuration, read once at startup and passed by reference
/// to whatever needs it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    #[serde(deserialize_with = "deserialize_port")]
    pub port: u16,
    pub is_debug: bool,
    /// Seconds in-flight requests get to finish after a shutdown signal
    pub shutdown_grace_secs: u64,
    pub storage: StorageConfig,
    pub handler: HandlerConfig,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
            is_debug: DEFAULT_IS_DEBUG,
            shutdown_grace_secs: DEFAULT_SHUTDOWN_GRACE_SECS,
            storage: StorageConfig::default(),
            handler: HandlerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load config from `path`.
    ///
    /// Loading order:
    /// 1. The YAML file must exist, otherwise `ConfigError::NotFound`
    /// 2. Missing keys take their defaults
    /// 3. Environment variable overrides (`PORT`, `IS_DEBUG`, `PT_*`)
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load(path: impl AsRef<Path>) -> ConfigErrorResult<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(ConfigError::NotFound { path });
        }

        let mut config = Self::load_yaml(&path)?;
        config.apply_env_overrides();

        Ok(config)
    }

    /// Path of the config file: `PT_CONFIG_PATH` if set, else `config.yml`
    pub fn config_path() -> PathBuf {
        std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    fn load_yaml(path: &PathBuf) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        // An empty document means "all defaults"
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }

        serde_yaml::from_str(&contents).map_err(|e| ConfigError::Yaml {
            path: path.clone(),
            source: e,
        })
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::server("host must not be empty"));
        }

        // Port 0 means "auto-assign"
        if self.port != 0 && self.port < MIN_PORT {
            return Err(ConfigError::server(format!(
                "port must be 0 (auto) or >= {}, got {}",
                MIN_PORT, self.port
            )));
        }

        if self.shutdown_grace_secs < MIN_SHUTDOWN_GRACE_SECS
            || self.shutdown_grace_secs > MAX_SHUTDOWN_GRACE_SECS
        {
            return Err(ConfigError::server(format!(
                "shutdown_grace_secs must be {}-{}, got {}",
                MIN_SHUTDOWN_GRACE_SECS, MAX_SHUTDOWN_GRACE_SECS, self.shutdown_grace_secs
            )));
        }

        self.storage.validate()?;
        self.handler.validate()?;

        Ok(())
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }

    /// Configured level, raised to at least `debug` in debug mode.
    pub fn effective_log_level(&self) -> LevelFilter {
        let configured = *self.logging.level;
        if self.is_debug {
            configured.max(LevelFilter::Debug)
        } else {
            configured
        }
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {} (debug: {}, shutdown grace {}s)",
            self.bind_addr(),
            self.is_debug,
            self.shutdown_grace_secs
        );
        info!("  storage: {}", self.storage.path);
        info!("  handler: timeout={}s", self.handler.timeout_secs);
        info!(
            "  logging: {} (colored: {}, file: {})",
            self.effective_log_level(),
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("PT_HOST", &mut self.host);
        Self::apply_env_parse("PORT", &mut self.port);
        Self::apply_env_bool("IS_DEBUG", &mut self.is_debug);
        Self::apply_env_parse("PT_SHUTDOWN_GRACE_SECS", &mut self.shutdown_grace_secs);

        // Storage
        Self::apply_env_string("PT_STORAGE_PATH", &mut self.storage.path);

        // Handler
        Self::apply_env_parse("PT_HANDLER_TIMEOUT_SECS", &mut self.handler.timeout_secs);

        // Logging
        Self::apply_env_parse("PT_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("PT_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("PT_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.trim().parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}

/// Accept `port: 8082` as well as `port: "8082"`.
fn deserialize_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PortValue {
        Number(u16),
        Text(String),
    }

    match PortValue::deserialize(deserializer)? {
        PortValue::Number(port) => Ok(port),
        PortValue::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid port: {text:?}"))),
    }
}
