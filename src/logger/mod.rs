//! Logger module
//!
//! Provides logging utilities for the HTTP server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use crate::routing::RouteTable;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config, routes: &RouteTable) {
    write_info("======================================");
    write_info(&format!("Server listening on {addr}"));
    write_info(&format!("Mode: {}", config.server.mode));
    write_info(&format!("Backlog: {}", config.server.backlog));
    match config.server.max_connections {
        Some(max) => write_info(&format!("Max concurrent connections: {max}")),
        None => write_info("Max concurrent connections: unbounded"),
    }
    write_info(&format!("Static files: {}", config.static_files.root));
    if routes.is_empty() {
        write_info("Routes: none (static files only)");
    } else {
        write_info(&format!("Routes: {} registered", routes.len()));
        for key in routes.keys() {
            write_info(&format!("  - {key}"));
        }
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================\n");
}

pub fn log_static_root_created(path: &std::path::Path) {
    write_info(&format!("Created static files directory: {}", path.display()));
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_closed(peer_addr: &SocketAddr) {
    write_info(&format!("[Connection] Closed: {peer_addr}"));
}

pub fn log_connection_error(peer_addr: &SocketAddr, err: &std::io::Error) {
    write_error(&format!("[ERROR] Connection {peer_addr}: {err}"));
}

/// Print the raw request text when `logging.show_request` is on
pub fn log_raw_request(peer_addr: &SocketAddr, raw: &str, show: bool) {
    if show {
        write_info(&format!("--- Request from {peer_addr} ---\n{raw}\n---------------------------"));
    }
}

pub fn log_echo_received(peer_addr: &SocketAddr, text: &str) {
    write_info(&format!("[Echo] Received from {peer_addr}: {text}"));
}

pub fn log_dispatch(method: &str, path: &str) {
    write_info(&format!("[Route] Dispatching to API handler: {method} {path}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}
