// API module entry
// Built-in JSON endpoints served ahead of static files in threaded mode

mod handlers;
mod response;
mod types;

use crate::routing::{Handler, RouteTable};

/// Build the fixed route table of built-in API endpoints
pub fn routes() -> RouteTable {
    RouteTable::new([
        ("GET", "/api/hello", handlers::hello as Handler),
        ("GET", "/api/time", handlers::time as Handler),
        ("POST", "/api/echo", handlers::echo as Handler),
    ])
}
