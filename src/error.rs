//! Error types
//!
//! Every failure while reading, parsing or answering a request is an
//! [`HttpError`]; each variant maps to exactly one response status.

use std::path::PathBuf;
use thiserror::Error;

use crate::http::Status;

/// Connection-scoped request failures
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request line is not exactly `METHOD PATH VERSION`
    #[error("Malformed request line: {0:?}")]
    MalformedRequestLine(String),

    /// Request bytes are not valid UTF-8
    #[error("Request is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// No route matched and the method cannot be served from disk
    #[error("Method {0} not supported for static files")]
    MethodNotSupported(String),

    /// Resolved path is missing or not a regular file
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Resolved path escapes the static root
    #[error("Path escapes static root: {}", .0.display())]
    OutsideRoot(PathBuf),

    /// File exists but could not be read
    #[error("Failed to read file '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A route handler failed to produce its response
    #[error("Handler failed: {0}")]
    Handler(String),
}

impl HttpError {
    /// Status code sent back for this error
    pub const fn status(&self) -> Status {
        match self {
            Self::MalformedRequestLine(_) | Self::InvalidUtf8(_) | Self::MethodNotSupported(_) => {
                Status::BadRequest
            }
            Self::NotFound(_) | Self::OutsideRoot(_) => Status::NotFound,
            Self::FileRead { .. } | Self::Handler(_) => Status::InternalServerError,
        }
    }
}

/// Startup failures that terminate the process
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("{0}")]
    Address(String),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to prepare static directory '{path}': {source}")]
    StaticRoot {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open log files: {0}")]
    Logger(#[source] std::io::Error),
}
