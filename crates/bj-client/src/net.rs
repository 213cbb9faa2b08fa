//! TCP connect and the request handshake.

use std::net::{IpAddr, SocketAddr, TcpStream};
use std::time::Duration;

use thiserror::Error;
use tracing::info;

use bj_core::protocol::codec::encode_request;
use bj_core::protocol::messages::Request;
use bj_core::protocol::transport::{send_bytes, TransportError};

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("failed to connect to dealer at {addr}: {source}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("handshake send failed: {0}")]
    Handshake(#[from] TransportError),
}

/// Connects to the dealer and sends the 38-byte request.
///
/// The connection attempt itself is bounded at 5 seconds; a dealer that
/// broadcast an offer but won't accept should not hang the client forever.
///
/// # Errors
///
/// Returns [`ConnectError::Connect`] if the TCP connection cannot be made
/// and [`ConnectError::Handshake`] if sending the request fails.
pub fn connect_and_request(
    dealer_ip: IpAddr,
    tcp_port: u16,
    request: &Request,
) -> Result<TcpStream, ConnectError> {
    let addr = SocketAddr::new(dealer_ip, tcp_port);
    let mut stream = TcpStream::connect_timeout(&addr, Duration::from_secs(5))
        .map_err(|source| ConnectError::Connect { addr, source })?;

    send_bytes(&mut stream, &encode_request(request))?;
    info!(
        "connected to {addr}, playing {} round(s) as \"{}\"",
        request.rounds, request.team_name
    );
    Ok(stream)
}
