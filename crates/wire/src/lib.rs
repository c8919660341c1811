// SPDX-License-Identifier: MIT

//! Wire protocol for the FMDM broadcast bus.
//!
//! Wire format: JSON text frames over a WebSocket connection. Every client
//! message carries a `type` tag and (except `connection.init`) a
//! client-chosen `id`; every response echoes that `id`. This crate owns the
//! message catalogue and the JSON codec; it knows nothing about sockets.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod client;
mod codec;
mod server;

pub use client::ClientMessage;
pub use codec::{decode_client, decode_server, encode, ProtocolError};
pub use server::{ModelDownloadEvent, ServerMessage, WireError};

#[cfg(test)]
mod property_tests;
