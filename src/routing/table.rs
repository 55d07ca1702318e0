//! Route table module
//!
//! No wildcards or path parameters: a route matches only when both the
//! method and the path are byte-for-byte equal to the request's.

use std::collections::HashMap;
use std::fmt;

use crate::error::HttpError;
use crate::http::{ParsedRequest, Response};

/// A route handler produces the full response for a request
pub type Handler = fn(&ParsedRequest) -> Result<Response, HttpError>;

/// (method, path) pair a handler is registered under
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    pub method: String,
    pub path: String,
}

impl RouteKey {
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            method: method.to_string(),
            path: path.to_string(),
        }
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Immutable route table
#[derive(Clone, Default)]
pub struct RouteTable {
    // method -> path -> handler, so lookups borrow instead of allocating a key
    routes: HashMap<String, HashMap<String, Handler>>,
}

impl RouteTable {
    /// Table with no routes; every request falls through to static serving
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from (method, path, handler) entries
    ///
    /// Methods are upper-cased at registration. A later entry for the same
    /// key replaces an earlier one.
    pub fn new<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str, Handler)>,
    {
        let mut routes: HashMap<String, HashMap<String, Handler>> = HashMap::new();
        for (method, path, handler) in entries {
            routes
                .entry(method.to_ascii_uppercase())
                .or_default()
                .insert(path.to_string(), handler);
        }
        Self { routes }
    }

    /// Exact lookup; request methods are compared as received
    pub fn lookup(&self, method: &str, path: &str) -> Option<Handler> {
        self.routes.get(method)?.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered keys, sorted for stable startup logging
    pub fn keys(&self) -> Vec<RouteKey> {
        let mut keys: Vec<RouteKey> = self
            .routes
            .iter()
            .flat_map(|(method, paths)| paths.keys().map(move |path| RouteKey::new(method, path)))
            .collect();
        keys.sort_by(|a, b| (&a.path, &a.method).cmp(&(&b.path, &b.method)));
        keys
    }
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.keys()).finish()
    }
}
