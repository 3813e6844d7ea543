// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub fixtures: FixtureConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    /// Falls back to the fixture's own default port when unset
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json)
    pub access_log_format: String,
    /// Access log file path (stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    /// Whole-connection timeout in seconds; unset means handlers may run forever
    #[serde(default)]
    pub connection_timeout: Option<u64>,
    #[serde(default)]
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    /// Content type for handler output that is text rather than a file
    pub text_content_type: String,
}

/// Sink locations used by the handlers
#[derive(Debug, Deserialize, Clone)]
pub struct FixtureConfig {
    /// Prefix for `/download`, concatenated as a plain string
    pub data_dir: String,
    /// Base for `/static`, joined as a path
    pub static_dir: String,
    /// Working directory for shell commands (server cwd if not set)
    #[serde(default)]
    pub work_dir: Option<String>,
    /// Shell invoked as `<shell> -c <command line>`
    pub shell: String,
}
