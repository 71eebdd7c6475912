//! `voxnote-config` — VoxNote runtime configuration management.
//!
//! Provides:
//! - Typed config schema (server, model tiers, logging, destinations)
//! - YAML loading
//! - `${ENV_VAR}` substitution
//! - Schema validation with per-path error reporting

pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

// Re-export most-used types at crate root.
pub use env::{resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_file_path, load_config};
pub use schema::{Destination, LoggingConfig, ModelsConfig, ServerConfig, VoxConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::Context;
use std::path::Path;
use voxnote_core::VoxError;

/// Load, apply env substitution, and validate a config file.
///
/// This is the main entry point for loading a config at runtime. Validation
/// errors (most notably an empty destination list) are fatal.
pub async fn load_and_prepare(path: &Path) -> Result<VoxConfig, VoxError> {
    let raw_config = load_config(path).await?;

    // Serialize to Value for the env substitution pass.
    let value = serde_json::to_value(&raw_config)
        .context("Failed to serialize config for processing")?;
    let value = resolve_env_vars(&value).context("Failed to resolve env vars in config")?;

    let config: VoxConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    if !report.is_valid() {
        return Err(VoxError::Config(
            report
                .errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; "),
        ));
    }

    Ok(config)
}
