// SPDX-License-Identifier: MIT

//! JSON encode/decode for wire frames.
//!
//! Each frame is one complete JSON text frame (no length prefix — the
//! WebSocket transport itself frames messages). Unknown `type` tags are the
//! one decode failure the bus must turn into a typed response rather than a
//! dropped connection; see [`ProtocolError::UnsupportedMessage`].

use crate::client::ClientMessage;
use crate::server::ServerMessage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed JSON frame: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unrecognized message type")]
    UnsupportedMessage,
}

/// Encode any serializable wire message to a JSON text frame.
pub fn encode<T: serde::Serialize>(message: &T) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(message)?)
}

/// Decode a client-sent frame. A JSON parse error is `Malformed`; valid JSON
/// with an unrecognized `type` tag is `UnsupportedMessage` so callers can
/// answer with `ErrorKind::UnsupportedMessage` instead of closing the socket.
pub fn decode_client(frame: &str) -> Result<ClientMessage, ProtocolError> {
    decode_tagged(frame)
}

pub fn decode_server(frame: &str) -> Result<ServerMessage, ProtocolError> {
    decode_tagged(frame)
}

fn decode_tagged<T: serde::de::DeserializeOwned>(frame: &str) -> Result<T, ProtocolError> {
    let value: serde_json::Value = serde_json::from_str(frame)?;
    serde_json::from_value(value).map_err(|_| ProtocolError::UnsupportedMessage)
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
