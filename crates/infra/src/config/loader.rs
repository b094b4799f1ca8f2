//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from a TOML file
//! 3. Probes a small set of conventional paths for config files
//!
//! ## Environment Variables
//! - `BOQLENS_DB_PATH`: Database file path (required)
//! - `BOQLENS_DB_POOL_SIZE`: Connection pool size (optional)
//! - `BOQLENS_STORAGE_ROOT`: Root directory for uploaded files (required)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./boqlens.toml`
//! 2. `./config.toml`
//! 3. `../boqlens.toml`

use std::path::{Path, PathBuf};

use boqlens_domain::constants::DEFAULT_DB_POOL_SIZE;
use boqlens_domain::{BoqLensError, Config, DatabaseConfig, Result, StorageConfig};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `BoqLensError::Config` if required variables are missing or have
/// invalid values.
pub fn load_from_env() -> Result<Config> {
    let db_path = env_var("BOQLENS_DB_PATH")?;
    let storage_root = env_var("BOQLENS_STORAGE_ROOT")?;
    let pool_size = match std::env::var("BOQLENS_DB_POOL_SIZE") {
        Ok(value) => value
            .parse::<u32>()
            .map_err(|e| BoqLensError::Config(format!("Invalid pool size: {e}")))?,
        Err(_) => DEFAULT_DB_POOL_SIZE,
    };

    Ok(Config {
        database: DatabaseConfig { path: db_path, pool_size },
        storage: StorageConfig { root: storage_root },
    })
}

/// Load configuration from a TOML file
///
/// If `path` is `None`, probes the conventional locations for a config file.
pub fn load_from_file(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => probe_config_paths()
            .into_iter()
            .find(|candidate| candidate.exists())
            .ok_or_else(|| {
                BoqLensError::Config("no configuration file found in probed paths".into())
            })?,
    };

    let contents = std::fs::read_to_string(&path).map_err(|e| {
        BoqLensError::Config(format!("cannot read {}: {e}", path.display()))
    })?;
    toml::from_str(&contents)
        .map_err(|e| BoqLensError::Config(format!("invalid config {}: {e}", path.display())))
}

/// Candidate configuration file paths, in probe order.
pub fn probe_config_paths() -> Vec<PathBuf> {
    vec![
        PathBuf::from("boqlens.toml"),
        PathBuf::from("config.toml"),
        PathBuf::from("../boqlens.toml"),
    ]
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| BoqLensError::Config(format!("missing environment variable {name}")))
}
