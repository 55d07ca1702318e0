// Built-in API handlers

use chrono::Local;
use serde_json::json;

use super::response::{error_response, json_response};
use super::types::{EchoResponse, HelloResponse, TimeResponse};
use crate::error::HttpError;
use crate::http::{ParsedRequest, Response, Status};
use crate::logger;

/// Header carrying the caller's name for `/api/hello`
const NAME_HEADER: &str = "X-Name";

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Name of the executing thread, or its id when unnamed
fn current_thread_name() -> String {
    let thread = std::thread::current();
    thread
        .name()
        .map_or_else(|| format!("{:?}", thread.id()), ToString::to_string)
}

/// `GET /api/hello`
pub fn hello(req: &ParsedRequest) -> Result<Response, HttpError> {
    let name = req.header(NAME_HEADER).unwrap_or("World");
    let body = HelloResponse {
        message: format!("Hello, {name} from API!"),
        timestamp: current_thread_name(),
    };
    json_response(Status::Ok, &body)
}

/// `GET /api/time`
pub fn time(_req: &ParsedRequest) -> Result<Response, HttpError> {
    let body = TimeResponse {
        current_time: Local::now().format(TIME_FORMAT).to_string(),
        thread_name: current_thread_name(),
    };
    json_response(Status::Ok, &body)
}

/// `POST /api/echo`
///
/// A body that is not JSON is echoed back as `{"received_raw_body": ...}`.
#[allow(clippy::unnecessary_wraps)]
pub fn echo(req: &ParsedRequest) -> Result<Response, HttpError> {
    let echo = serde_json::from_str(&req.body)
        .unwrap_or_else(|_| json!({ "received_raw_body": req.body }));

    let body = EchoResponse {
        status: "success",
        echo,
        method: &req.method,
    };
    match serde_json::to_string(&body) {
        Ok(json) => Ok(Response::json(Status::Ok, json)),
        Err(e) => {
            logger::log_warning(&format!("Echo failed: {e}"));
            Ok(error_response(Status::BadRequest, &e.to_string()))
        }
    }
}
