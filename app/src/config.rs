//! Application configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use mailscribe_session::SessionConfig;
use mailscribe_verification::WorkflowConfig;

use crate::logging::LogFormat;
use crate::AppError;

/// Configuration for the MailScribe application.
///
/// Can be loaded from a TOML file via [`AppConfig::from_toml_file`] or built
/// programmatically (e.g. for tests). Missing keys take their defaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the LMDB environment.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Simulated round-trip for login and signup, in milliseconds.
    #[serde(default = "default_auth_latency_ms")]
    pub auth_latency_ms: u64,

    /// Simulated classification delay per batch, in milliseconds.
    #[serde(default = "default_classifier_delay_ms")]
    pub classifier_delay_ms: u64,

    /// Runs above this many emails get an advisory notice.
    #[serde(default = "default_large_batch_threshold")]
    pub large_batch_threshold: usize,

    /// Whether a fresh workflow starts with the demo history.
    #[serde(default = "default_true")]
    pub seed_demo_history: bool,

    /// LMDB map size in bytes.
    #[serde(default = "default_lmdb_map_size")]
    pub lmdb_map_size: usize,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_data_dir() -> PathBuf {
    PathBuf::from("./mailscribe_data")
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_auth_latency_ms() -> u64 {
    1000
}

fn default_classifier_delay_ms() -> u64 {
    2000
}

fn default_large_batch_threshold() -> usize {
    1000
}

fn default_true() -> bool {
    true
}

fn default_lmdb_map_size() -> usize {
    64 * 1024 * 1024
}

// ── Impl ───────────────────────────────────────────────────────────────

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, AppError> {
        toml::from_str(s).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, AppError> {
        toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// The configured log format, falling back to human-readable output.
    pub fn log_format(&self) -> LogFormat {
        self.log_format.parse().unwrap_or(LogFormat::Human)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            auth_latency: Duration::from_millis(self.auth_latency_ms),
            ..SessionConfig::default()
        }
    }

    pub fn workflow_config(&self) -> WorkflowConfig {
        WorkflowConfig {
            large_batch_threshold: self.large_batch_threshold,
            ..WorkflowConfig::default()
        }
    }

    pub fn classifier_delay(&self) -> Duration {
        Duration::from_millis(self.classifier_delay_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            log_format: default_log_format(),
            auth_latency_ms: default_auth_latency_ms(),
            classifier_delay_ms: default_classifier_delay_ms(),
            large_batch_threshold: default_large_batch_threshold(),
            seed_demo_history: default_true(),
            lmdb_map_size: default_lmdb_map_size(),
        }
    }
}
