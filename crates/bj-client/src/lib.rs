//! LAN Blackjack player library.
//!
//! The client waits on the UDP offer port until a dealer announces itself,
//! connects over TCP, and plays the requested rounds from the terminal. The
//! whole client is synchronous: one socket, one conversation, blocking I/O.
//!
//! - **`config`** – TOML settings with serde defaults.
//! - **`discovery`** – blocks until a valid offer datagram arrives.
//! - **`net`** – TCP connect + request handshake.
//! - **`prompt`** – where decisions come from (stdin, or scripted in tests).
//! - **`session`** – plays the rounds over any `Read + Write`.
//! - **`table`** – terminal rendering of the table state.

pub mod config;
pub mod discovery;
pub mod net;
pub mod prompt;
pub mod session;
pub mod table;
