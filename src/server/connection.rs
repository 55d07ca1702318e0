// Connection handling module
// One read, one response, then close

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::Instant;

use crate::config::{AppState, ServerMode};
use crate::error::HttpError;
use crate::handler;
use crate::http::{parse_request, Response, Status};
use crate::logger::{self, AccessLogEntry};

/// Read once, up to `buffer_size` bytes
///
/// No loop: anything the client sends beyond the buffer, or after the first
/// segment arrives, is never seen.
pub fn read_once<S: Read>(stream: &mut S, buffer_size: usize) -> io::Result<Vec<u8>> {
    let mut buf = vec![0u8; buffer_size];
    let n = stream.read(&mut buf)?;
    buf.truncate(n);
    Ok(buf)
}

/// Handle an accepted HTTP connection and close it.
///
/// Applies the configured socket timeouts, serves exactly one response and
/// drops the stream. I/O failures end the connection and are logged.
pub fn handle_connection(mut stream: TcpStream, peer_addr: SocketAddr, state: &AppState) {
    let performance = &state.config.performance;
    if let Err(e) = stream
        .set_read_timeout(performance.read_timeout())
        .and_then(|()| stream.set_write_timeout(performance.write_timeout()))
    {
        logger::log_connection_error(&peer_addr, &e);
        return;
    }

    if state.logs_connections() {
        logger::log_connection_accepted(&peer_addr);
    }

    if let Err(e) = serve_http(&mut stream, peer_addr, state) {
        logger::log_connection_error(&peer_addr, &e);
    }

    if state.logs_connections() {
        logger::log_connection_closed(&peer_addr);
    }
}

/// Handle an accepted echo connection and close it
pub fn handle_echo_connection(mut stream: TcpStream, peer_addr: SocketAddr, state: &AppState) {
    if state.logs_connections() {
        logger::log_connection_accepted(&peer_addr);
    }

    if let Err(e) = serve_echo(&mut stream, peer_addr, state.read_buffer_size) {
        logger::log_connection_error(&peer_addr, &e);
    }
    drop(stream);

    if state.logs_connections() {
        logger::log_connection_closed(&peer_addr);
    }
}

/// Serve one HTTP request on any byte stream.
///
/// Zero bytes read means the peer went away: nothing is written. Otherwise
/// exactly one response is written, whatever the outcome of parsing and
/// dispatch.
pub fn serve_http<S: Read + Write>(
    stream: &mut S,
    peer_addr: SocketAddr,
    state: &AppState,
) -> io::Result<()> {
    let data = read_once(stream, state.read_buffer_size)?;
    if data.is_empty() {
        return Ok(());
    }

    let started = Instant::now();
    let mut entry = AccessLogEntry::new(peer_addr.to_string());
    let response = respond(&data, peer_addr, state, &mut entry);

    response.write_to(stream)?;

    if state.config.logging.access_log {
        entry.set_response(response.status, response.body.len());
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }
    Ok(())
}

/// Decode, parse and dispatch, turning any failure into its error page
fn respond(
    data: &[u8],
    peer_addr: SocketAddr,
    state: &AppState,
    entry: &mut AccessLogEntry,
) -> Response {
    let result = std::str::from_utf8(data)
        .map_err(HttpError::from)
        .and_then(|text| {
            logger::log_raw_request(&peer_addr, text, state.config.logging.show_request);
            let req = parse_request(text)?;
            entry.record_request(&req);
            handler::handle_request(&req, state)
        });

    match result {
        Ok(response) => response,
        Err(err) => {
            if err.status() == Status::InternalServerError {
                logger::log_error(&format!("Error handling request from {peer_addr}: {err}"));
            } else {
                logger::log_warning(&format!("Request from {peer_addr}: {err}"));
            }
            error_page(&err, state.config.server.mode)
        }
    }
}

/// Error page for a failed request
///
/// The sequential static server answers a malformed request line with the
/// plain 400 page; the threaded server names the malformed request.
fn error_page(err: &HttpError, mode: ServerMode) -> Response {
    match (err, mode) {
        (HttpError::MalformedRequestLine(_), ServerMode::Static) => {
            Response::html(Status::BadRequest, "<h1>400 Bad Request</h1>")
        }
        _ => Response::from(err),
    }
}

/// Echo mode: reply with the received text, no HTTP framing
pub fn serve_echo<S: Read + Write>(
    stream: &mut S,
    peer_addr: SocketAddr,
    buffer_size: usize,
) -> io::Result<()> {
    let data = read_once(stream, buffer_size)?;
    if data.is_empty() {
        return Ok(());
    }

    let text = String::from_utf8_lossy(&data);
    logger::log_echo_received(&peer_addr, &text);
    stream.write_all(format!("Hello, client! You sent: {text}").as_bytes())?;
    stream.flush()
}
