// Server module entry
// Listener setup, per-connection handling and the accept loops of each mode

pub mod connection;
pub mod limiter;
pub mod listener;

// `loop` is a keyword, so the module file is mapped under another name
#[path = "loop.rs"]
pub mod server_loop;

// Re-export commonly used items
pub use listener::create_reusable_listener;
pub use server_loop::run;
