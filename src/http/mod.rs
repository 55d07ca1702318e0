//! HTTP protocol layer module
//!
//! Request parsing, response serialization and MIME lookup for the minimal
//! HTTP/1.1 subset spoken over a raw socket: one request, one response, close.

pub mod mime;
pub mod request;
pub mod response;

// Re-export commonly used types
pub use request::{parse_request, ParsedRequest};
pub use response::{Response, Status};
