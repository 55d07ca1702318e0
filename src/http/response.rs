//! HTTP response building module
//!
//! Provides the status set, response builders, and the writer that puts a
//! response on the wire.

use std::io::{self, Write};

use crate::error::HttpError;

/// The fixed set of statuses this server ever sends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    BadRequest,
    NotFound,
    InternalServerError,
}

impl Status {
    pub const fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::InternalServerError => 500,
        }
    }

    pub const fn reason(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::BadRequest => "Bad Request",
            Self::NotFound => "Not Found",
            Self::InternalServerError => "Internal Server Error",
        }
    }
}

/// A complete response: status, content type and body bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: Status,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: Status, content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: content_type.into(),
            body: body.into(),
        }
    }

    /// Build HTML response
    pub fn html(status: Status, body: impl Into<String>) -> Self {
        Self::new(status, "text/html", body.into())
    }

    /// Build JSON response from already serialized text
    pub fn json(status: Status, body: impl Into<String>) -> Self {
        Self::new(status, "application/json", body.into())
    }

    /// Serialize status line, headers and body
    ///
    /// Headers and body go out as two writes, in that order. The caller
    /// closes the connection afterwards.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let head = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            self.status.code(),
            self.status.reason(),
            self.content_type,
            self.body.len(),
        );
        out.write_all(head.as_bytes())?;
        out.write_all(&self.body)?;
        out.flush()
    }
}

impl From<&HttpError> for Response {
    fn from(err: &HttpError) -> Self {
        let status = err.status();
        let body = match err {
            HttpError::MalformedRequestLine(_) => "<h1>400 Malformed Request</h1>".to_string(),
            HttpError::InvalidUtf8(_) => "<h1>400 Bad Request</h1>".to_string(),
            HttpError::MethodNotSupported(method) => {
                format!("<h1>400 Bad Request: Method {method} not supported for static files.</h1>")
            }
            HttpError::NotFound(_) | HttpError::OutsideRoot(_) => "<h1>404 Not Found</h1>".to_string(),
            HttpError::FileRead { .. } | HttpError::Handler(_) => {
                "<h1>500 Internal Server Error</h1>".to_string()
            }
        };
        Self::html(status, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_write_html_response() {
        let mut out = Vec::new();
        Response::html(Status::Ok, "<h1>Hi</h1>").write_to(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 11\r\nConnection: close\r\n\r\n<h1>Hi</h1>"
        );
    }

    #[test]
    fn test_content_length_counts_bytes() {
        let mut out = Vec::new();
        Response::json(Status::Ok, "\"héllo\"").write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Content-Length: 8\r\n"));
    }

    #[test]
    fn test_binary_body_is_written_verbatim() {
        let body = vec![0x89, b'P', b'N', b'G', 0x00, 0xff];
        let mut out = Vec::new();
        Response::new(Status::Ok, "image/png", body.clone())
            .write_to(&mut out)
            .unwrap();
        assert!(out.ends_with(&body));
        let head = String::from_utf8_lossy(&out[..out.len() - body.len()]).to_string();
        assert!(head.contains("Content-Type: image/png\r\n"));
        assert!(head.contains("Content-Length: 6\r\n"));
    }

    #[test]
    fn test_status_lines() {
        assert_eq!(Status::Ok.code(), 200);
        assert_eq!(Status::BadRequest.reason(), "Bad Request");
        assert_eq!(Status::NotFound.code(), 404);
        assert_eq!(Status::InternalServerError.reason(), "Internal Server Error");
    }

    #[test]
    fn test_error_pages() {
        let resp = Response::from(&HttpError::MethodNotSupported("PUT".into()));
        assert_eq!(resp.status, Status::BadRequest);
        assert_eq!(
            resp.body,
            b"<h1>400 Bad Request: Method PUT not supported for static files.</h1>".to_vec()
        );

        let resp = Response::from(&HttpError::NotFound(PathBuf::from("static/missing.png")));
        assert_eq!(resp.status, Status::NotFound);
        assert_eq!(resp.content_type, "text/html");
        assert_eq!(resp.body, b"<h1>404 Not Found</h1>".to_vec());
    }
}
