//! Server module
//!
//! Listener construction and the accept loop.

pub mod connection;
pub mod listener;

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::AppState;
use crate::logger;

pub use listener::create_listener;

/// Accept connections until ctrl-c.
///
/// Accept errors are logged and the loop keeps going; a failed accept must
/// not stop the server.
pub async fn run(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    let connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, peer_addr)) => {
                        connection::accept_connection(stream, peer_addr, &state, &connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!("\nShutting down");
                return Ok(());
            }
        }
    }
}
