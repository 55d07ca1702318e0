//! Request routing dispatch module
//!
//! Exact API route match first; unmatched GETs fall through to static files.

use crate::config::AppState;
use crate::error::HttpError;
use crate::http::{ParsedRequest, Response};
use crate::logger;

/// Main entry point for HTTP request handling
pub fn handle_request(req: &ParsedRequest, state: &AppState) -> Result<Response, HttpError> {
    if let Some(handler) = state.routes.lookup(&req.method, &req.path) {
        logger::log_dispatch(&req.method, &req.path);
        return handler(req);
    }

    if req.method == "GET" {
        return state.static_files.serve(&req.path);
    }

    logger::log_warning(&format!(
        "Method not supported for static files: {} {}",
        req.method, req.path
    ));
    Err(HttpError::MethodNotSupported(req.method.clone()))
}
