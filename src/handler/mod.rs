//! Request handler module
//!
//! Dispatches a parsed request to an API route or to static file serving.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
pub use static_files::StaticFiles;
