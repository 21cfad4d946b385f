mod config;

pub use config::{CelebrationConfig, Config, JourneyConfig, PollConfig};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/sevenrealms[-dev]/` based on SEVENREALMS_ENV.
///
/// Set SEVENREALMS_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("SEVENREALMS_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("sevenrealms-dev")
    } else {
        base_dir.join("sevenrealms")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
