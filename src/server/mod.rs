// Server module entry point
// Accept loop with graceful shutdown drain

pub mod connection;
pub mod listener;
pub mod signal;

pub use listener::create_listener;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use crate::config::Config;
use crate::logger;

/// Bound on how long shutdown waits for in-flight connections
const DRAIN_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);

/// Run the accept loop until a shutdown notification arrives
///
/// Each accepted connection is served in its own task. On shutdown the
/// loop stops accepting, then waits up to `DRAIN_TIMEOUT` for active
/// connections to finish.
pub async fn run(
    listener: TcpListener,
    config: Arc<Config>,
    shutdown: Arc<Notify>,
) -> Result<(), Box<dyn std::error::Error>> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        connection::accept_connection(
                            stream,
                            peer_addr,
                            &config,
                            &active_connections,
                        );
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = shutdown.notified() => {
                logger::log_shutdown_started();
                break;
            }
        }
    }

    // Stop accepting, then let in-flight connections finish
    drop(listener);
    let deadline = tokio::time::Instant::now() + DRAIN_TIMEOUT;
    while active_connections.load(Ordering::SeqCst) > 0
        && tokio::time::Instant::now() < deadline
    {
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }

    let remaining = active_connections.load(Ordering::SeqCst);
    if remaining > 0 {
        logger::log_warning(&format!(
            "Drain timeout reached with {remaining} connections still active"
        ));
    }
    logger::log_server_stopped();
    Ok(())
}
