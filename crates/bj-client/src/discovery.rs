//! Offer discovery: block until some dealer broadcasts a valid offer.
//!
//! The client binds the shared offer port and reads datagrams with a
//! 1-second timeout so a Ctrl-C or an injected `running` flag can stop the
//! wait. Anything that fails to decode as an offer is dropped silently at
//! `debug` level; the LAN may carry unrelated broadcast traffic on any
//! port.

use std::net::{Ipv4Addr, SocketAddr, UdpSocket};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use bj_core::protocol::codec::decode_offer;
use bj_core::protocol::messages::{Offer, OFFER_LEN};

#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The offer port could not be bound. Usually another client instance
    /// already has it.
    #[error("failed to bind offer port {port}: {source}")]
    BindFailed {
        port: u16,
        #[source]
        source: std::io::Error,
    },

    /// An I/O error other than a read timeout.
    #[error("recv error: {0}")]
    Recv(#[from] std::io::Error),

    /// The `running` flag went false before any offer arrived.
    #[error("discovery cancelled")]
    Cancelled,
}

/// Blocks until a valid offer datagram arrives on `offer_port`.
///
/// Returns the decoded offer and the dealer's source address; connect to
/// `(source.ip(), offer.tcp_port)`. Checks `running` once a second and
/// returns [`DiscoveryError::Cancelled`] once it goes false.
///
/// # Errors
///
/// Returns [`DiscoveryError::BindFailed`] if the port cannot be bound and
/// [`DiscoveryError::Recv`] for socket failures other than timeouts.
pub fn wait_for_offer(
    offer_port: u16,
    running: &Arc<AtomicBool>,
) -> Result<(Offer, SocketAddr), DiscoveryError> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, offer_port)).map_err(|source| {
        DiscoveryError::BindFailed {
            port: offer_port,
            source,
        }
    })?;
    socket.set_read_timeout(Some(Duration::from_secs(1)))?;

    info!("listening for dealer offers on UDP {offer_port}");
    let mut buf = [0u8; 256];
    while running.load(Ordering::Relaxed) {
        let (len, src) = match socket.recv_from(&mut buf) {
            Ok(pair) => pair,
            Err(e) if is_timeout(&e) => continue,
            Err(e) => return Err(e.into()),
        };

        if len != OFFER_LEN {
            debug!("ignoring {len}-byte datagram from {src}");
            continue;
        }
        match decode_offer(&buf[..len]) {
            Ok(offer) => {
                info!(
                    "offer from \"{}\" at {} (tcp port {})",
                    offer.server_name,
                    src.ip(),
                    offer.tcp_port
                );
                return Ok((offer, src));
            }
            Err(e) => {
                debug!("ignoring bad offer from {src}: {e}");
            }
        }
    }
    Err(DiscoveryError::Cancelled)
}

fn is_timeout(e: &std::io::Error) -> bool {
    matches!(
        e.kind(),
        std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
    )
}
