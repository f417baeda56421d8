use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use itrack_auth::Credential;
use serde::Deserialize;

const CONFIG_ENV: &str = "ITRACK_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "itrack.toml";
const ENV_PREFIX: &str = "ITRACK";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub vendor: VendorSettings,
    #[serde(default)]
    pub sync: SyncSettings,
}

#[derive(Deserialize, Clone)]
pub struct VendorSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub account: String,
    pub password: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SyncSettings {
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    #[serde(default)]
    pub run_once: bool,
    #[serde(default = "default_low_battery_threshold")]
    pub low_battery_threshold: i32,
}

fn default_base_url() -> String {
    itrack_api::BASE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_interval() -> u64 {
    3600
}

fn default_concurrency() -> usize {
    1
}

fn default_store_path() -> PathBuf {
    PathBuf::from("vehicles.json")
}

fn default_low_battery_threshold() -> i32 {
    20
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
            concurrency: default_concurrency(),
            store_path: default_store_path(),
            run_once: false,
            low_battery_threshold: default_low_battery_threshold(),
        }
    }
}

impl std::fmt::Debug for VendorSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VendorSettings")
            .field("base_url", &self.base_url)
            .field("account", &self.account)
            .field("password", &"[REDACTED]")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl VendorSettings {
    pub fn credential(&self) -> Credential {
        Credential::new(self.account.clone(), self.password.clone())
    }
}

impl Settings {
    /// Loads `itrack.toml` (or the file named by `ITRACK_CONFIG`) overlaid
    /// with `ITRACK_*` environment variables, e.g. `ITRACK_VENDOR__PASSWORD`.
    pub fn new() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(config_path)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_with(path.as_ref(), Self::environment())
    }

    /// `ITRACK_` followed by the key path joined with `__`.
    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
    }

    fn load_with(path: &Path, environment: Environment) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(environment)
            .build()?;

        settings.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.vendor.account.trim().is_empty() {
            return Err("vendor.account is required".to_string());
        }
        if self.vendor.password.is_empty() {
            return Err("vendor.password is required".to_string());
        }
        if !self.vendor.base_url.starts_with("http") {
            return Err("vendor.base_url must be a valid HTTP(S) URL".to_string());
        }
        if self.vendor.request_timeout_secs == 0 {
            return Err("vendor.request_timeout_secs must be greater than zero".to_string());
        }
        if self.sync.interval_secs == 0 {
            return Err("sync.interval_secs must be greater than zero".to_string());
        }
        if self.sync.concurrency == 0 {
            return Err("sync.concurrency must be at least 1".to_string());
        }
        Ok(())
    }
}
