//! TCP accept loop, one thread per connected client.
//!
//! The listener socket is non-blocking and polled every 200ms so the accept
//! thread can notice the shutdown flag without a pending `accept` holding it
//! hostage. Each accepted connection gets its own blocking thread running
//! [`crate::session::run_session`]; outcomes flow back to the async main
//! task over a Tokio mpsc channel via `blocking_send`.

use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use bj_core::session::SessionStats;

use crate::session::run_session;

/// Error type for listener startup.
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("failed to bind game listener on {addr}: {source}")]
    BindFailed {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("listener socket configuration failed: {0}")]
    Socket(#[from] std::io::Error),
}

/// Events the accept loop and session threads report to the main task.
#[derive(Debug)]
pub enum ServerEvent {
    /// A client connected and its session thread started.
    Connected { peer: SocketAddr },
    /// A session ran to completion.
    SessionFinished {
        peer: SocketAddr,
        team_name: String,
        stats: SessionStats,
    },
    /// A session ended early (disconnect, protocol violation, I/O error).
    SessionFailed { peer: SocketAddr, reason: String },
}

/// Binds the game listener and spawns the accept thread.
///
/// Returns the port actually bound (the interesting case is `tcp_port` 0,
/// where the OS picks) alongside the event receiver. The accept thread exits
/// once `running` goes false; session threads already playing a round finish
/// their client normally.
///
/// # Errors
///
/// Returns [`ListenerError::BindFailed`] if the address cannot be bound.
pub fn start_listener(
    bind_address: &str,
    tcp_port: u16,
    running: Arc<AtomicBool>,
) -> Result<(u16, mpsc::Receiver<ServerEvent>), ListenerError> {
    let addr = format!("{bind_address}:{tcp_port}");
    let listener = TcpListener::bind(&addr).map_err(|source| ListenerError::BindFailed {
        addr: addr.clone(),
        source,
    })?;
    listener.set_nonblocking(true)?;
    let port = listener.local_addr()?.port();

    let (tx, rx) = mpsc::channel(64);

    std::thread::Builder::new()
        .name("bj-accept".to_string())
        .spawn(move || accept_loop(listener, tx, running))?;

    info!("game listener on {addr} (port {port})");
    Ok((port, rx))
}

/// Polls the non-blocking listener until shutdown, spawning a session thread
/// per accepted connection.
fn accept_loop(listener: TcpListener, tx: mpsc::Sender<ServerEvent>, running: Arc<AtomicBool>) {
    while running.load(Ordering::Relaxed) {
        match listener.accept() {
            Ok((stream, peer)) => {
                // Accepted sockets may inherit the listener's non-blocking
                // mode on some platforms; session I/O wants to block.
                if let Err(e) = stream.set_nonblocking(false) {
                    error!("could not make session socket blocking for {peer}: {e}");
                    continue;
                }
                info!("client connected from {peer}");
                if tx.blocking_send(ServerEvent::Connected { peer }).is_err() {
                    break;
                }
                spawn_session_thread(stream, peer, tx.clone());
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                std::thread::sleep(Duration::from_millis(200));
            }
            Err(e) => {
                error!("accept failed: {e}");
                std::thread::sleep(Duration::from_millis(200));
            }
        }
    }
    info!("accept loop stopped");
}

fn spawn_session_thread(stream: TcpStream, peer: SocketAddr, tx: mpsc::Sender<ServerEvent>) {
    let spawned = std::thread::Builder::new()
        .name(format!("bj-session-{peer}"))
        .spawn(move || {
            let event = match run_session(stream) {
                Ok((team_name, stats)) => ServerEvent::SessionFinished {
                    peer,
                    team_name,
                    stats,
                },
                Err(e) => ServerEvent::SessionFailed {
                    peer,
                    reason: e.to_string(),
                },
            };
            // Receiver gone means the server is shutting down.
            let _ = tx.blocking_send(event);
        });
    if let Err(e) = spawned {
        warn!("failed to spawn session thread for {peer}: {e}");
    }
}
