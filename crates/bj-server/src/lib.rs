//! LAN Blackjack dealer library.
//!
//! The server advertises itself with a UDP offer broadcast once a second and
//! plays each connecting client on its own thread over plain TCP. The binary
//! in `main.rs` wires the pieces together; everything here is testable
//! without touching a real socket except the two modules that own one.
//!
//! - **`config`** – TOML settings with serde defaults.
//! - **`net`** – the offer beacon and the TCP accept loop.
//! - **`session`** – drives one client's rounds over any `Read + Write`.

pub mod config;
pub mod net;
pub mod session;
