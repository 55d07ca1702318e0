// Configuration module entry point
// Loads layered configuration (defaults, optional file, environment)

mod state;
mod types;

use std::net::SocketAddr;
use std::time::Duration;

// Re-export public types
pub use state::AppState;
pub use types::{Config, PerformanceConfig, ServerMode, StaticFilesConfig};

/// Default config file name (extension resolved by the `config` crate)
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Environment variable prefix, e.g. `HTTPD_SERVER__PORT=9000`
const ENV_PREFIX: &str = "HTTPD";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// The file is optional; missing keys fall back to defaults
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.mode", "threaded")?
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.backlog", 5)?
            .set_default("static_files.root", "static")?
            .set_default("static_files.index_file", "index.html")?
            .set_default("static_files.create_root", true)?
            .set_default("static_files.confine_to_root", true)?
            .set_default("performance.read_timeout", 0)?
            .set_default("performance.write_timeout", 0)?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_request", false)?
            .set_default("logging.access_log_format", "combined")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn port(&self) -> u16 {
        self.server
            .port
            .unwrap_or_else(|| self.server.mode.default_port())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.port())
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    pub fn read_buffer_size(&self) -> usize {
        self.performance
            .read_buffer_size
            .filter(|size| *size > 0)
            .unwrap_or_else(|| self.server.mode.default_read_buffer_size())
    }
}

impl PerformanceConfig {
    pub const fn read_timeout(&self) -> Option<Duration> {
        seconds(self.read_timeout)
    }

    pub const fn write_timeout(&self) -> Option<Duration> {
        seconds(self.write_timeout)
    }
}

const fn seconds(secs: u64) -> Option<Duration> {
    if secs == 0 {
        None
    } else {
        Some(Duration::from_secs(secs))
    }
}
