mod config;
pub mod database;

pub use config::{Config, StoreConfig, WorkoutConfig};
pub use database::Database;

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/fitstreak[-dev]/` based on FITSTREAK_ENV.
///
/// Set FITSTREAK_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FITSTREAK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("fitstreak-dev")
    } else {
        base_dir.join("fitstreak")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
