use figment::{Figment, providers::{Env, Format, Serialized, Yaml}};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::MoblogError;

/// Top-level configuration shared by both servers.
///
/// Resolved once at startup and never mutated afterwards; handlers receive it
/// behind an `Arc`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoblogConfig {
    #[serde(default)]
    pub log_server: LogServerConfig,
    #[serde(default)]
    pub static_server: StaticServerConfig,
}

/// Log ingestion server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_log_port")]
    pub port: u16,
    /// JSON Lines file every accepted event is appended to.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    /// Request bodies above this size are rejected with 413.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Characters of `args[0]` echoed to the console per event.
    #[serde(default = "default_echo_chars")]
    pub echo_chars: usize,
}

/// Static file server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_static_port")]
    pub port: u16,
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

// ── Defaults ──────────────────────────────────────────────────

fn default_host() -> String { "0.0.0.0".into() }
fn default_log_port() -> u16 { 3001 }
fn default_static_port() -> u16 { 8000 }
fn default_log_file() -> PathBuf { PathBuf::from("mobile-logs.jsonl") }
fn default_max_body_bytes() -> usize { 5 * 1024 * 1024 }
fn default_echo_chars() -> usize { 160 }
fn default_root() -> PathBuf { PathBuf::from(".") }

// ── Impls ─────────────────────────────────────────────────────

impl Default for LogServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_log_port(),
            log_file: default_log_file(),
            max_body_bytes: default_max_body_bytes(),
            echo_chars: default_echo_chars(),
        }
    }
}

impl Default for StaticServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_static_port(),
            root: default_root(),
        }
    }
}

impl LogServerConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, MoblogError> {
        parse_addr(&self.host, self.port)
    }
}

impl StaticServerConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, MoblogError> {
        parse_addr(&self.host, self.port)
    }
}

fn parse_addr(host: &str, port: u16) -> Result<SocketAddr, MoblogError> {
    format!("{host}:{port}")
        .parse()
        .map_err(|e| MoblogError::Config(format!("invalid bind address {host}:{port}: {e}")))
}

impl MoblogConfig {
    /// Layer defaults, an optional YAML file and `MOBLOG_` env overrides.
    ///
    /// A missing file is not an error; the remaining layers still apply.
    /// Nested keys use a double underscore: `MOBLOG_LOG_SERVER__PORT=4000`.
    pub fn load(path: Option<&Path>) -> Result<Self, MoblogError> {
        let mut figment = Figment::from(Serialized::defaults(MoblogConfig::default()));
        if let Some(path) = path {
            if path.exists() {
                tracing::debug!(path = %path.display(), "Merging config file");
                figment = figment.merge(Yaml::file(path));
            } else {
                tracing::debug!(path = %path.display(), "Config file not found, skipping");
            }
        }
        figment
            .merge(Env::prefixed("MOBLOG_").split("__"))
            .extract()
            .map_err(|e| MoblogError::Config(e.to_string()))
    }
}
