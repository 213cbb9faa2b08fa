//! TOML-based configuration for the dealer binary.
//!
//! Every field carries a serde default, so the server runs with no config
//! file at all; a partial file overrides only what it names. Example:
//!
//! ```toml
//! [server]
//! name = "Dealer Dan"
//!
//! [network]
//! tcp_port = 45001
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use bj_core::protocol::messages::OFFER_PORT;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level dealer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub network: NetworkConfig,
}

/// Identity and logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Name broadcast in offers. Longer names are truncated to the 32-byte
    /// wire field.
    #[serde(default = "default_server_name")]
    pub name: String,
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Network port and bind-address settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkConfig {
    /// IP address to bind the TCP listener to. `"0.0.0.0"` binds all
    /// interfaces.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// TCP port for game sessions. `0` lets the OS pick a free port; the
    /// chosen port is what the offer broadcast advertises.
    #[serde(default)]
    pub tcp_port: u16,
    /// UDP port offers are broadcast to. Clients listen on this port.
    #[serde(default = "default_offer_port")]
    pub offer_port: u16,
    /// Interval between offer broadcasts, in milliseconds.
    #[serde(default = "default_offer_interval_ms")]
    pub offer_interval_ms: u64,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_server_name() -> String {
    "Blackjack Dealer".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}
fn default_offer_port() -> u16 {
    OFFER_PORT
}
fn default_offer_interval_ms() -> u64 {
    1000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            log_level: default_log_level(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            tcp_port: 0,
            offer_port: default_offer_port(),
            offer_interval_ms: default_offer_interval_ms(),
        }
    }
}

/// Loads [`AppConfig`] from `path`, or from `./bj-server.toml` when no path
/// is given. A missing file yields `AppConfig::default()`.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let path = path.unwrap_or_else(|| Path::new("bj-server.toml"));

    match std::fs::read_to_string(path) {
        Ok(content) => {
            let cfg: AppConfig = toml::from_str(&content)?;
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
