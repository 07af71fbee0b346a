//! Configuration loading for Posit Hub.
//! Reads posit-hub.toml from the current directory or the path in POSIT_HUB_CONFIG.
//! A missing file is not an error: every key has a default.

use posit_hub_common::{HubError, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

pub const CONFIG_ENV: &str = "POSIT_HUB_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "posit-hub.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    /// Request body cap, applied to multipart uploads.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_host()             -> String { "127.0.0.1".to_string() }
fn default_port()             -> u16    { 3001 }
fn default_static_dir()       -> String { "static".to_string() }
fn default_max_upload_bytes() -> usize  { 2 * 1024 * 1024 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| HubError::Config(format!("invalid bind address {}:{}: {e}", self.host, self.port)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_phase")]
    pub phase: String,
    #[serde(default = "default_feedback_url")]
    pub feedback_url: String,
    #[serde(default = "default_docs_url")]
    pub docs_url: String,
}

fn default_title()        -> String { "Posit Connect RAG Agent".to_string() }
fn default_phase()        -> String { "beta".to_string() }
fn default_feedback_url() -> String { "mailto:posit-support@example.gov.uk".to_string() }
fn default_docs_url()     -> String { "https://docs.posit.co/connect/".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            phase: default_phase(),
            feedback_url: default_feedback_url(),
            docs_url: default_docs_url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `posit_hub_web=debug,tower_http=info`.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String { "info".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_log_filter() }
    }
}

mod tests;

impl Config {
    /// Load configuration: `.env`, then the TOML file, then env overrides.
    pub fn load() -> Result<Self> {
        // A missing .env is fine
        let _ = dotenvy::dotenv();

        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_path(&path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Read a TOML file, falling back to defaults when it does not exist.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| HubError::Config(e.to_string()))
    }

    /// Apply `POSIT_HUB_HOST`, `POSIT_HUB_PORT` and `RUST_LOG` on top of the file values.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("POSIT_HUB_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("POSIT_HUB_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| HubError::Config(format!("POSIT_HUB_PORT is not a port number: {port}")))?;
        }
        if let Some(filter) = lookup("RUST_LOG") {
            self.logging.filter = filter;
        }
        Ok(())
    }
}
