// SPDX-License-Identifier: MIT

//! Messages sent from a connected client to the daemon.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Every variant but `ConnectionInit` carries a client-chosen correlation id;
/// the server's response to it echoes that id back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "connection.init")]
    ConnectionInit { client_type: String },

    #[serde(rename = "folder.validate")]
    FolderValidate { id: String, path: PathBuf },

    #[serde(rename = "folder.add")]
    FolderAdd { id: String, path: PathBuf, model: String },

    #[serde(rename = "folder.remove")]
    FolderRemove { id: String, path: PathBuf },

    /// Moves a folder out of `error` back into `scanning` (ADDED, §4.8.1).
    #[serde(rename = "folder.retry")]
    FolderRetry { id: String, path: PathBuf },

    #[serde(rename = "models.list")]
    ModelsList { id: String },

    #[serde(rename = "ping")]
    Ping { id: String },
}

impl ClientMessage {
    /// The correlation id the server's response must echo, if any.
    /// `connection.init` has none — it is answered by an unsolicited
    /// `connection.ack` plus the first `fmdm.update`.
    pub fn request_id(&self) -> Option<&str> {
        match self {
            ClientMessage::ConnectionInit { .. } => None,
            ClientMessage::FolderValidate { id, .. }
            | ClientMessage::FolderAdd { id, .. }
            | ClientMessage::FolderRemove { id, .. }
            | ClientMessage::FolderRetry { id, .. }
            | ClientMessage::ModelsList { id }
            | ClientMessage::Ping { id } => Some(id),
        }
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
