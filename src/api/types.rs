// API type definitions
// Response bodies of the built-in endpoints

use serde::Serialize;

/// `GET /api/hello`
#[derive(Debug, Serialize)]
pub struct HelloResponse {
    pub message: String,
    /// Name of the thread that served the request
    pub timestamp: String,
}

/// `GET /api/time`
#[derive(Debug, Serialize)]
pub struct TimeResponse {
    /// Local time, `YYYY-MM-DD HH:MM:SS`
    pub current_time: String,
    pub thread_name: String,
}

/// `POST /api/echo`
#[derive(Debug, Serialize)]
pub struct EchoResponse<'a> {
    pub status: &'static str,
    pub echo: serde_json::Value,
    pub method: &'a str,
}
