//! UDP offer beacon.
//!
//! Once a second (configurable) the dealer broadcasts a 39-byte offer to
//! `255.255.255.255` on the offer port. The offer names the TCP port the
//! accept loop actually bound, so the beacon starts only after the listener
//! has reported its port.
//!
//! The beacon runs on a dedicated thread; it checks the shared `running`
//! flag after each send and exits within one interval of shutdown.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, UdpSocket};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use bj_core::protocol::codec::encode_offer;
use bj_core::protocol::messages::Offer;

/// Error type for beacon startup.
#[derive(Debug, Error)]
pub enum OfferError {
    /// The UDP socket could not be bound or put into broadcast mode.
    #[error("failed to set up offer socket: {0}")]
    Socket(#[from] std::io::Error),
}

/// Spawns the offer beacon thread.
///
/// Broadcasts `offer` to `255.255.255.255:{offer_port}` every `interval`
/// until `running` goes false. Send failures are logged and the beacon keeps
/// going; a transient network error should not kill discovery.
///
/// # Errors
///
/// Returns [`OfferError::Socket`] if the socket cannot be created up front.
pub fn start_offer_beacon(
    offer: Offer,
    offer_port: u16,
    interval: Duration,
    running: Arc<AtomicBool>,
) -> Result<std::thread::JoinHandle<()>, OfferError> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
    socket.set_broadcast(true)?;
    let target = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::BROADCAST, offer_port));
    let datagram = encode_offer(&offer);

    let handle = std::thread::Builder::new()
        .name("bj-offer-beacon".to_string())
        .spawn(move || {
            info!(
                "offer beacon broadcasting \"{}\" (tcp port {}) to {target}",
                offer.server_name, offer.tcp_port
            );
            while running.load(Ordering::Relaxed) {
                match socket.send_to(&datagram, target) {
                    Ok(_) => debug!("offer sent to {target}"),
                    Err(e) => warn!("offer broadcast failed: {e}"),
                }
                std::thread::sleep(interval);
            }
            info!("offer beacon stopped");
        })?;

    Ok(handle)
}
