
use std::env;
use std::path::PathBuf;

use tempfile::TempDir;

/// Every variable `Config::load` reads as an override
const OVERRIDE_VARS: [&str; 9] = [
    "PORT",
    "IS_DEBUG",
    "PT_HOST",
    "PT_SHUTDOWN_GRACE_SECS",
    "PT_STORAGE_PATH",
    "PT_HANDLER_TIMEOUT_SECS",
    "PT_LOG_LEVEL",
    "PT_LOG_COLORED",
    "PT_LOG_FILE",
];

/// RAII guard for environment variables - automatically restores on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::remove_var(key);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// Temp dir holding a `config.yml` with `contents`; overrides from the
/// surrounding environment are cleared for the lifetime of the guards.
pub(crate) fn setup_config_file(contents: &str) -> (TempDir, PathBuf, Vec<EnvGuard>) {
    let guards = OVERRIDE_VARS.iter().map(|key| EnvGuard::remove(key)).collect();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.yml");
    std::fs::write(&path, contents).unwrap();
    (temp, path, guards)
}
