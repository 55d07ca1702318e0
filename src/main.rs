use std::sync::Arc;

mod api;
mod config;
mod error;
mod handler;
mod http;
mod logger;
mod routing;
mod server;

use crate::config::{AppState, ServerMode};
use crate::error::ServerError;
use crate::handler::StaticFiles;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // First argument overrides the config file path (extension optional)
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());

    let cfg = config::Config::load_from(&config_path).map_err(ServerError::from)?;
    logger::init(&cfg).map_err(ServerError::Logger)?;

    if cfg.server.mode != ServerMode::Echo && cfg.static_files.create_root {
        prepare_static_root(&cfg.static_files)?;
    }

    let addr = cfg.get_socket_addr().map_err(ServerError::Address)?;
    let listener = server::create_reusable_listener(addr, cfg.server.backlog)
        .map_err(|source| ServerError::Bind { addr, source })?;

    let state = Arc::new(AppState::new(&cfg));
    logger::log_server_start(&addr, &cfg, &state.routes);

    server::run(&listener, state);
    Ok(())
}

/// Create the static root if it does not exist yet
fn prepare_static_root(static_cfg: &config::StaticFilesConfig) -> Result<(), ServerError> {
    let files = StaticFiles::from_config(static_cfg);
    let created = files.ensure_root().map_err(|source| ServerError::StaticRoot {
        path: static_cfg.root.clone(),
        source,
    })?;
    if created {
        logger::log_static_root_created(files.root());
    }
    Ok(())
}
