//! TOML-based application configuration.
//!
//! Stores the remote store endpoint and workout defaults at
//! `~/.config/fitstreak/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::{ConfigError, CoreError, Result};
use crate::session::Difficulty;

/// Remote store endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the hosted realtime database.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Optional database auth token sent with every request.
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Bounded wait applied to each store request.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Defaults applied when `workout run` is invoked without arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutConfig {
    #[serde(default = "default_duration_min")]
    pub default_duration_min: u64,
    #[serde(default = "default_title")]
    pub default_title: String,
    #[serde(default = "default_difficulty")]
    pub default_difficulty: Difficulty,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/fitstreak/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub workout: WorkoutConfig,
}

// Default functions
fn default_base_url() -> String {
    "https://fitstreak-default-rtdb.firebaseio.com".into()
}
fn default_request_timeout() -> u64 {
    10
}
fn default_duration_min() -> u64 {
    20
}
fn default_title() -> String {
    "Workout".into()
}
fn default_difficulty() -> Difficulty {
    Difficulty::Beginner
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            auth_token: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for WorkoutConfig {
    fn default() -> Self {
        Self {
            default_duration_min: default_duration_min(),
            default_title: default_title(),
            default_difficulty: default_difficulty(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            workout: WorkoutConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: e.to_string(),
                        })?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: format!("cannot parse '{value}' as number"),
                        })?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Null => serde_json::Value::String(value.into()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or write and return the default.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be
    /// parsed, or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| {
                    CoreError::Config(ConfigError::LoadFailed {
                        path,
                        message: e.to_string(),
                    })
                })?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| {
            CoreError::Config(ConfigError::SaveFailed {
                path: path.clone(),
                message: e.to_string(),
            })
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key and persist. Returns an error if the
    /// key is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        self.save()?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}
