//! Client configuration, read from `~/.userlist/config.yaml`

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_LOG_FILE, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_BACKOFF_MS,
    DEFAULT_TIMEOUT_SECS,
};
use crate::models::SyncPolicy;

const CONFIG_FILE: &str = "config.yaml";

/// Environment variable overriding `base_url`
pub const ENV_BASE_URL: &str = "USERLIST_BASE_URL";

/// Environment variable overriding `sync_policy`
pub const ENV_SYNC_POLICY: &str = "USERLIST_SYNC_POLICY";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    pub sync_policy: SyncPolicy,
    /// Re-fetch the list after every successful add or delete
    pub reconcile_after_mutation: bool,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
            sync_policy: SyncPolicy::default(),
            reconcile_after_mutation: false,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    /// Directory holding the config file
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".userlist")
    }

    /// Load from the default location. Environment overrides are applied
    /// separately by [`Config::apply_env`] once logging is up.
    pub fn load() -> Result<Config> {
        Self::load_from(&Self::config_dir().join(CONFIG_FILE))
    }

    /// Load from a file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Apply `USERLIST_BASE_URL` and `USERLIST_SYNC_POLICY`
    pub fn apply_env(&mut self) {
        let ignored = self.apply_overrides(
            std::env::var(ENV_BASE_URL).ok(),
            std::env::var(ENV_SYNC_POLICY).ok(),
        );
        for value in ignored {
            tracing::warn!(%value, var = ENV_SYNC_POLICY, "Ignoring unknown sync policy");
        }
    }

    /// Apply overrides, returning the sync policy values that were not
    /// understood and therefore ignored
    pub fn apply_overrides(
        &mut self,
        base_url: Option<String>,
        sync_policy: Option<String>,
    ) -> Vec<String> {
        let mut ignored = Vec::new();
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        if let Some(raw) = sync_policy {
            match SyncPolicy::parse(&raw) {
                Some(policy) => self.sync_policy = policy,
                None => ignored.push(raw),
            }
        }
        ignored
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}
