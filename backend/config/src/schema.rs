//! VoxNote runtime configuration schema.
//!
//! Typed for serde YAML/JSON deserialization. Every section except
//! `destinations` carries usable defaults; destinations must be supplied.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root configuration for VoxNote.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoxConfig {
    /// Gateway server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Model ids per generation tier
    #[serde(default)]
    pub models: ModelsConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Destination profiles, in routing priority order.
    /// The first entry doubles as the fallback when no keyword matches.
    #[serde(default)]
    pub destinations: Vec<Destination>,
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory where uploaded audio files are stored.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,

    /// Accepted upload file extensions (lowercase, no dot).
    #[serde(default = "default_extensions")]
    pub allowed_extensions: Vec<String>,
}

fn default_port() -> u16 {
    5000
}

fn default_upload_dir() -> String {
    "./uploads".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["m4a".to_string()]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            upload_dir: default_upload_dir(),
            allowed_extensions: default_extensions(),
        }
    }
}

// ---------------------------------------------------------------------------
// Models
// ---------------------------------------------------------------------------

/// Model ids for the two generation tiers.
///
/// Short label-style fields (Title, Name) go to the light tier; everything
/// else goes to the heavy tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    #[serde(default = "default_light_model")]
    pub light: String,

    #[serde(default = "default_heavy_model")]
    pub heavy: String,
}

fn default_light_model() -> String {
    "gpt-3.5-turbo-1106".to_string()
}

fn default_heavy_model() -> String {
    "gpt-4-1106-preview".to_string()
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            light: default_light_model(),
            heavy: default_heavy_model(),
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Destinations
// ---------------------------------------------------------------------------

/// One destination profile: where matching memos land and which fields
/// get generated for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    /// Display name (diagnostic/log use only).
    pub name: String,

    /// Target database id in the external service.
    pub db_id: String,

    /// Output language passed through to every generation call.
    pub language: String,

    /// Trigger keywords. Matching is case-insensitive with trailing
    /// punctuation stripped from input tokens.
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Ordered field list. Fields that depend on others (Followup,
    /// Preparation, Recommendations) must be listed after their
    /// dependencies.
    #[serde(default)]
    pub fields: Vec<String>,
}
