// Configuration types module
// Defines the environment-driven configuration structure

use serde::Deserialize;

/// Main configuration structure, populated from `MEMSITE_*` environment
/// variables.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Canonical host (host[:port]) used by the HTTP-to-HTTPS redirector
    pub host: String,
    /// TLS certificate PEM path; TLS is enabled only with both cert and key
    #[serde(default)]
    pub cert: Option<String>,
    /// TLS private key PEM path
    #[serde(default)]
    pub key: Option<String>,
    /// Site root directory to load into memory (required)
    pub site: String,
    /// Alias JSON file path; missing or broken aliases are non-fatal
    #[serde(default)]
    pub alias: Option<String>,
    /// Listen port when TLS is disabled
    pub port: u16,
    /// Per-connection read timeout in seconds
    pub read_timeout: u64,
    /// Per-connection write timeout in seconds
    pub write_timeout: u64,
    pub access_log: bool,
    /// Access log format ("common" or "json")
    pub access_log_format: String,
    /// Access log file path (stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

impl Config {
    /// TLS is enabled only when both certificate and key paths are present.
    pub fn tls_enabled(&self) -> bool {
        self.cert.is_some() && self.key.is_some()
    }
}
