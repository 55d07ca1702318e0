//! Routing module
//!
//! Exact-match (method, path) dispatch table, built once before the listener
//! starts and shared read-only by every connection.

mod table;

pub use table::{Handler, RouteKey, RouteTable};
