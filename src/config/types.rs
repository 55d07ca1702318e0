// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
    pub performance: PerformanceConfig,
    pub logging: LoggingConfig,
}

/// Which of the three server variants to run
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ServerMode {
    /// Single-connection echo server, no HTTP framing
    Echo,
    /// Sequential static file server
    Static,
    /// Thread-per-connection API router with static fallback
    Threaded,
}

impl ServerMode {
    /// Port used when `server.port` is not configured
    pub const fn default_port(self) -> u16 {
        match self {
            Self::Echo => 8000,
            Self::Static | Self::Threaded => 8080,
        }
    }

    /// Size of the single read performed per connection
    pub const fn default_read_buffer_size(self) -> usize {
        match self {
            Self::Echo => 1024,
            Self::Static | Self::Threaded => 4096,
        }
    }
}

impl std::fmt::Display for ServerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Echo => write!(f, "echo"),
            Self::Static => write!(f, "static"),
            Self::Threaded => write!(f, "threaded"),
        }
    }
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub mode: ServerMode,
    pub host: String,
    /// Falls back to the mode's default port when unset
    #[serde(default)]
    pub port: Option<u16>,
    pub backlog: i32,
    /// Upper bound on live handler threads (threaded mode only, unset = unbounded)
    #[serde(default)]
    pub max_connections: Option<usize>,
}

/// Static file serving configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StaticFilesConfig {
    pub root: String,
    pub index_file: String,
    /// Create the root directory at startup if it is missing
    pub create_root: bool,
    /// Reject resolved paths that escape the root directory
    pub confine_to_root: bool,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    /// Overrides the mode's read buffer size
    #[serde(default)]
    pub read_buffer_size: Option<usize>,
    /// Seconds, 0 disables the deadline
    pub read_timeout: u64,
    /// Seconds, 0 disables the deadline
    pub write_timeout: u64,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Print the raw request text of every connection
    pub show_request: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}
