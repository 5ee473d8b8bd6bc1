mod config;
mod error;
mod handler_config;
mod log_level;
mod logging_config;
mod storage_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use handler_config::HandlerConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use storage_config::StorageConfig;

pub const DEFAULT_CONFIG_PATH: &str = "config.yml";
pub const CONFIG_PATH_ENV: &str = "PT_CONFIG_PATH";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8082;
const MIN_PORT: u16 = 1024;
const DEFAULT_IS_DEBUG: bool = false;

const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 5;
const MIN_SHUTDOWN_GRACE_SECS: u64 = 1;
const MAX_SHUTDOWN_GRACE_SECS: u64 = 60;

const DEFAULT_STORAGE_PATH: &str = "data/list_patients.json";

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_COLORED: bool = true;
