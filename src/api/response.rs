// API response utility functions module

use serde::Serialize;

use crate::error::HttpError;
use crate::http::{Response, Status};
use crate::logger;

/// Build JSON response
pub fn json_response<T: Serialize>(status: Status, body: &T) -> Result<Response, HttpError> {
    let json = serde_json::to_string(body).map_err(|e| {
        logger::log_error(&format!("Failed to serialize response: {e}"));
        HttpError::Handler(e.to_string())
    })?;
    Ok(Response::json(status, json))
}

/// `{"error": <message>}` with the given status
pub fn error_response(status: Status, message: &str) -> Response {
    Response::json(status, serde_json::json!({ "error": message }).to_string())
}
