// Configuration module entry point
// Loads layered configuration and holds shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::{
    Config, FixtureConfig, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig,
};

/// Config file name (without extension) used when none is given on the command line
pub const DEFAULT_CONFIG_NAME: &str = "fixtures";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// Layers, lowest priority first: built-in defaults, the optional file,
    /// then `FIXTURE_`-prefixed environment variables (`FIXTURE_SERVER__PORT=8080`).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("FIXTURE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive", true)?
            .set_default("http.server_name", "sink-fixtures")?
            .set_default("http.text_content_type", "text/html; charset=utf-8")?
            .set_default("fixtures.data_dir", "/var/data/")?
            .set_default("fixtures.static_dir", "/app/static")?
            .set_default("fixtures.shell", "sh")?
            .build()?;

        settings.try_deserialize()
    }

    /// Listener address, using `default_port` when `server.port` is unset
    pub fn get_socket_addr(&self, default_port: u16) -> Result<SocketAddr, String> {
        let port = self.server.port.unwrap_or(default_port);
        format!("{}:{port}", self.server.host)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
