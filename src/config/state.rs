// Application state module
// Read-only state shared by every connection

use super::types::{Config, ServerMode};
use crate::api;
use crate::handler::StaticFiles;
use crate::routing::RouteTable;

/// Application state, built once before the listener starts
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub routes: RouteTable,
    pub static_files: StaticFiles,
    pub read_buffer_size: usize,
}

impl AppState {
    /// Build state for the configured mode
    ///
    /// Only the threaded mode registers the API routes; static mode serves
    /// files alone.
    pub fn new(config: &Config) -> Self {
        let routes = match config.server.mode {
            ServerMode::Threaded => api::routes(),
            ServerMode::Static | ServerMode::Echo => RouteTable::empty(),
        };

        Self {
            config: config.clone(),
            routes,
            static_files: StaticFiles::from_config(&config.static_files),
            read_buffer_size: config.read_buffer_size(),
        }
    }

    /// Whether connection open and close lines are logged, in every mode
    pub const fn logs_connections(&self) -> bool {
        self.config.logging.access_log
    }

    /// Explicit parts, for embedding the server in tests
    #[cfg(test)]
    pub fn with_parts(config: Config, routes: RouteTable, static_files: StaticFiles) -> Self {
        let read_buffer_size = config.read_buffer_size();
        Self {
            config,
            routes,
            static_files,
            read_buffer_size,
        }
    }
}
