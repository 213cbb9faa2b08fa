//! Socket-owning side of the dealer: the UDP offer beacon and the TCP
//! accept loop. Both run on dedicated threads so the synchronous socket
//! calls never block the Tokio runtime; each reports back through a shared
//! `AtomicBool` shutdown flag and (for the listener) a Tokio mpsc channel.

pub mod listener;
pub mod offer;

pub use listener::{start_listener, ListenerError, ServerEvent};
pub use offer::{start_offer_beacon, OfferError};
