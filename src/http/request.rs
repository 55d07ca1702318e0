//! Request parsing module
//!
//! Turns the decoded text of a single read into a [`ParsedRequest`].

use std::collections::HashMap;

use crate::error::HttpError;

/// A request as read off the wire, built once per connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    pub method: String,
    pub path: String,
    pub http_version: String,
    /// Keys are kept as received; a repeated key keeps its last value
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ParsedRequest {
    /// Case-sensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Parse raw request text
///
/// The request line must be exactly three tokens separated by single spaces.
/// Header lines run until the first empty line; lines without a colon are
/// skipped. Everything after the empty line is the body, rejoined with CRLF.
/// Without an empty line the body is empty.
pub fn parse_request(raw: &str) -> Result<ParsedRequest, HttpError> {
    let mut lines = raw.split("\r\n");
    let request_line = lines.next().unwrap_or_default();

    let parts: Vec<&str> = request_line.split(' ').collect();
    let [method, path, http_version] = parts.as_slice() else {
        return Err(HttpError::MalformedRequestLine(request_line.to_string()));
    };

    let mut headers = HashMap::new();
    let mut saw_separator = false;
    for line in lines.by_ref() {
        if line.is_empty() {
            saw_separator = true;
            break;
        }
        if let Some((key, value)) = line.split_once(':') {
            headers.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    let body = if saw_separator {
        lines.collect::<Vec<_>>().join("\r\n")
    } else {
        String::new()
    };

    Ok(ParsedRequest {
        method: (*method).to_string(),
        path: (*path).to_string(),
        http_version: (*http_version).to_string(),
        headers,
        body,
    })
}
