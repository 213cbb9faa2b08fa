//! Protocol module containing message types, the binary codec, and the
//! exact-read transport helpers.

pub mod codec;
pub mod messages;
pub mod transport;

pub use codec::WireError;
pub use messages::*;
pub use transport::{FrameError, TransportError};
