//! LAN Blackjack dealer entry point.
//!
//! Wires together the listener, the offer beacon, and the shutdown handler:
//!
//! ```text
//! main()
//!  └─ load_config()        -- TOML file, defaults when absent
//!  └─ start_listener()     -- TCP accept thread, reports the bound port
//!  └─ start_offer_beacon() -- UDP broadcast thread advertising that port
//!  └─ event pump           -- session results arriving over mpsc
//! ```
//!
//! All socket work happens on plain threads; the async runtime only hosts
//! the event pump and the Ctrl-C handler.

use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use bj_core::protocol::messages::Offer;
use bj_server::config::load_config;
use bj_server::net::{start_listener, start_offer_beacon, ServerEvent};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional first argument: path to the config file.
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = load_config(config_path.as_deref())?;

    // Structured logging. `RUST_LOG` overrides the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    info!("LAN Blackjack dealer \"{}\" starting", config.server.name);

    // Shutdown flag shared across all background threads.
    let running = Arc::new(AtomicBool::new(true));

    // The listener goes first: the beacon advertises whatever port it bound.
    let (tcp_port, mut events) = start_listener(
        &config.network.bind_address,
        config.network.tcp_port,
        Arc::clone(&running),
    )?;

    let offer = Offer {
        tcp_port,
        server_name: config.server.name.clone(),
    };
    start_offer_beacon(
        offer,
        config.network.offer_port,
        Duration::from_millis(config.network.offer_interval_ms),
        Arc::clone(&running),
    )?;

    // ── Ctrl-C handler ────────────────────────────────────────────────────────
    let running_clone = Arc::clone(&running);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            running_clone.store(false, Ordering::Relaxed);
        }
    });

    info!("dealer ready on TCP port {tcp_port}. Press Ctrl-C to exit.");

    // ── Event pump ────────────────────────────────────────────────────────────
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(ServerEvent::Connected { peer }) => {
                    info!("session started with {peer}");
                }
                Some(ServerEvent::SessionFinished { peer, team_name, stats }) => {
                    info!(
                        "\"{team_name}\" ({peer}) finished: {} round(s), {} won, {} lost, {} tied ({:.0}% win rate)",
                        stats.rounds_played,
                        stats.wins,
                        stats.losses,
                        stats.ties,
                        stats.win_rate() * 100.0,
                    );
                }
                Some(ServerEvent::SessionFailed { peer, reason }) => {
                    warn!("session with {peer} failed: {reason}");
                }
                None => {
                    error!("accept loop channel closed unexpectedly");
                    running.store(false, Ordering::Relaxed);
                }
            },
            _ = tokio::time::sleep(Duration::from_millis(100)) => {}
        }
        if !running.load(Ordering::Relaxed) {
            break;
        }
    }

    info!("dealer stopped");
    Ok(())
}
