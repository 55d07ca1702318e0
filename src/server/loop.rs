// Server loop module
// Accept loops for the echo, static and threaded modes

use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

use super::connection::{handle_connection, handle_echo_connection};
use super::limiter::ConnectionLimiter;
use crate::config::{AppState, ServerMode};
use crate::logger;

/// Run the accept loop for the configured mode. Never returns.
pub fn run(listener: &TcpListener, state: Arc<AppState>) {
    match state.config.server.mode {
        ServerMode::Echo => run_echo(listener, &state),
        ServerMode::Static => run_sequential(listener, &state),
        ServerMode::Threaded => {
            let limiter = state.config.server.max_connections.map(ConnectionLimiter::new);
            run_threaded(listener, &state, limiter.as_ref());
        }
    }
}

/// Accept the next connection, logging and skipping accept errors
fn accept_next(listener: &TcpListener) -> (TcpStream, SocketAddr) {
    loop {
        match listener.accept() {
            Ok(accepted) => return accepted,
            Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
        }
    }
}

/// Echo mode: one connection at a time, raw text reply
pub fn run_echo(listener: &TcpListener, state: &AppState) {
    loop {
        let (stream, peer_addr) = accept_next(listener);
        handle_echo_connection(stream, peer_addr, state);
    }
}

/// Static mode: accept, handle and close before accepting the next
pub fn run_sequential(listener: &TcpListener, state: &AppState) {
    loop {
        let (stream, peer_addr) = accept_next(listener);
        handle_connection(stream, peer_addr, state);
    }
}

/// Threaded mode: one named thread per connection
///
/// With a limiter the loop blocks until a slot is free; without one the
/// number of live handler threads is unbounded.
pub fn run_threaded(listener: &TcpListener, state: &Arc<AppState>, limiter: Option<&ConnectionLimiter>) {
    loop {
        let (stream, peer_addr) = accept_next(listener);
        let permit = limiter.map(ConnectionLimiter::acquire);
        let state = Arc::clone(state);

        let spawned = thread::Builder::new()
            .name(format!("ClientHandler-{}", peer_addr.port()))
            .spawn(move || {
                let _permit = permit;
                handle_connection(stream, peer_addr, &state);
            });

        if let Err(e) = spawned {
            logger::log_error(&format!(
                "Failed to spawn handler thread for {peer_addr}: {e}"
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api;
    use crate::config::Config;
    use crate::handler::StaticFiles;
    use crate::routing::RouteTable;
    use crate::server::create_reusable_listener;
    use std::io::{Read, Write};
    use std::time::{Duration, Instant};

    fn test_config(mode: ServerMode) -> Config {
        let mut config = Config::load_from("no/such/config").unwrap();
        config.server.mode = mode;
        config.logging.access_log = false;
        config
    }

    fn start(mode: ServerMode, routes: RouteTable, root: &std::path::Path) -> SocketAddr {
        start_with(test_config(mode), routes, root)
    }

    fn start_with(config: Config, routes: RouteTable, root: &std::path::Path) -> SocketAddr {
        let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap(), 5).unwrap();
        let addr = listener.local_addr().unwrap();

        let state = Arc::new(AppState::with_parts(
            config,
            routes,
            StaticFiles::new(root, "index.html", true),
        ));

        thread::spawn(move || run(&listener, state));
        addr
    }

    fn request(addr: SocketAddr, raw: &str) -> String {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream.write_all(raw.as_bytes()).unwrap();
        let mut out = String::new();
        stream.read_to_string(&mut out).unwrap();
        out
    }

    fn hello_from(name: &str) -> String {
        format!("GET /api/hello HTTP/1.1\r\nX-Name: {name}\r\n\r\n")
    }

    #[test]
    fn test_threaded_slow_clients_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let addr = start(ServerMode::Threaded, api::routes(), dir.path());

        // Slow client connects first but holds its request back
        let mut slow = TcpStream::connect(addr).unwrap();
        let mut other = TcpStream::connect(addr).unwrap();
        thread::sleep(Duration::from_millis(100));

        // The second client is served while the first is still silent
        other.write_all(hello_from("Grace").as_bytes()).unwrap();
        let mut other_out = String::new();
        other.read_to_string(&mut other_out).unwrap();

        slow.write_all(hello_from("Ada").as_bytes()).unwrap();
        let mut slow_out = String::new();
        slow.read_to_string(&mut slow_out).unwrap();

        assert!(other_out.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(other_out.contains("Hello, Grace from API!"));
        assert!(!other_out.contains("Ada"));
        assert!(other_out.contains("ClientHandler-"));

        assert!(slow_out.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(slow_out.contains("Hello, Ada from API!"));
        assert!(!slow_out.contains("Grace"));
    }

    #[test]
    fn test_threaded_many_concurrent_clients() {
        let dir = tempfile::tempdir().unwrap();
        let addr = start(ServerMode::Threaded, api::routes(), dir.path());

        let clients: Vec<_> = (0..8)
            .map(|i| {
                thread::spawn(move || {
                    let body = format!("{{\"client\":{i}}}");
                    let raw = format!("POST /api/echo HTTP/1.1\r\n\r\n{body}");
                    (i, request(addr, &raw))
                })
            })
            .collect();

        for client in clients {
            let (i, out) = client.join().unwrap();
            let body = out.split("\r\n\r\n").nth(1).unwrap();
            let value: serde_json::Value = serde_json::from_str(body).unwrap();
            assert_eq!(value["echo"]["client"], i);
        }
    }

    #[test]
    fn test_static_mode_serves_files_sequentially() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>Hi</h1>").unwrap();
        let addr = start(ServerMode::Static, RouteTable::empty(), dir.path());

        let first = request(addr, "GET / HTTP/1.1\r\n\r\n");
        assert!(first.contains("Content-Length: 11\r\n"));
        assert!(first.ends_with("<h1>Hi</h1>"));

        let second = request(addr, "GET /missing.png HTTP/1.1\r\n\r\n");
        assert!(second.starts_with("HTTP/1.1 404 Not Found\r\n"));
    }

    #[test]
    fn test_echo_mode_replies_raw() {
        let dir = tempfile::tempdir().unwrap();
        let addr = start(ServerMode::Echo, RouteTable::empty(), dir.path());

        assert_eq!(request(addr, "ping"), "Hello, client! You sent: ping");

        // An empty connection does not stop the loop
        drop(TcpStream::connect(addr).unwrap());
        assert_eq!(request(addr, "again"), "Hello, client! You sent: again");
    }

    #[test]
    fn test_silent_client_times_out_without_response() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config(ServerMode::Threaded);
        config.performance.read_timeout = 1;
        let addr = start_with(config, api::routes(), dir.path());

        let mut silent = TcpStream::connect(addr).unwrap();
        silent.set_read_timeout(Some(Duration::from_secs(10))).unwrap();
        let started = Instant::now();

        let mut out = Vec::new();
        let n = silent.read_to_end(&mut out).unwrap();
        assert_eq!(n, 0);
        assert!(out.is_empty());
        assert!(started.elapsed() >= Duration::from_millis(500));
    }

    #[test]
    fn test_max_connections_holds_back_extra_clients() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config(ServerMode::Threaded);
        config.server.max_connections = Some(1);
        let addr = start_with(config, api::routes(), dir.path());

        // The first client takes the only slot and stays silent
        let mut first = TcpStream::connect(addr).unwrap();
        thread::sleep(Duration::from_millis(100));

        let mut second = TcpStream::connect(addr).unwrap();
        second.write_all(hello_from("Grace").as_bytes()).unwrap();
        second.set_read_timeout(Some(Duration::from_millis(300))).unwrap();
        let mut byte = [0u8; 1];
        assert!(second.read(&mut byte).is_err(), "second client answered while slot held");

        first.write_all(hello_from("Ada").as_bytes()).unwrap();
        let mut first_out = String::new();
        first.read_to_string(&mut first_out).unwrap();
        assert!(first_out.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(first_out.contains("Hello, Ada from API!"));

        second.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
        let mut second_out = String::new();
        second.read_to_string(&mut second_out).unwrap();
        assert!(second_out.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(second_out.contains("Hello, Grace from API!"));
    }
}
