// SPDX-License-Identifier: MIT

//! Messages pushed from the daemon to a connected client.

use fmcp_core::{ErrorKind, Fmdm};
use serde::{Deserialize, Serialize};

/// A request/response error, carried only on the wire — never propagated
/// between crates as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireError {
    pub kind: ErrorKind,
    pub message: String,
}

impl WireError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }
}

/// The four download lifecycle events fanned out to every connected client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelDownloadEvent {
    Start,
    Progress,
    Complete,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "connection.ack")]
    ConnectionAck,

    /// Response to a correlated client request. Exactly one of `data`/`error`
    /// is present.
    Response {
        id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<serde_json::Value>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<WireError>,
    },

    #[serde(rename = "fmdm.update")]
    FmdmUpdate { fmdm: Fmdm },

    ModelDownload {
        #[serde(rename = "modelName")]
        model_name: String,
        event: ModelDownloadEvent,
        #[serde(skip_serializing_if = "Option::is_none")]
        progress: Option<u8>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },

    Pong { id: String },
}

impl ServerMessage {
    pub fn ok(id: impl Into<String>, data: serde_json::Value) -> Self {
        ServerMessage::Response { id: id.into(), data: Some(data), error: None }
    }

    pub fn err(id: impl Into<String>, error: WireError) -> Self {
        ServerMessage::Response { id: id.into(), data: None, error: Some(error) }
    }
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
