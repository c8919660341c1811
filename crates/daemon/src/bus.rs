// SPDX-License-Identifier: MIT

//! Broadcast Bus (C9): a WebSocket server bound to loopback on a
//! dynamically chosen free port (§4.8). Every connection gets its own task;
//! requests are correlated by client-chosen `id` and handled concurrently
//! across connections. The FMDM store is never blocked by a slow client —
//! pushes use a bounded per-connection queue and a full queue closes the
//! socket rather than stalling the publisher (§5 "shared resources").

use std::net::SocketAddr;
use std::sync::Arc;

use fmcp_core::{ErrorKind, Fmdm, ModelDownload};
use fmcp_embed::MODEL_REGISTRY;
use fmcp_store::FmdmHandle;
use fmcp_wire::{decode_client, encode, ClientMessage, ModelDownloadEvent, ProtocolError, ServerMessage, WireError};
use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::env;
use crate::folder_manager::FolderManager;

/// Per-connection outbound queue depth before the daemon treats the client
/// as slow and disconnects it.
const OUTBOX_CAPACITY: usize = 64;

#[derive(Debug, Error)]
pub enum BusError {
    #[error("websocket handshake failed: {0}")]
    Handshake(#[from] tokio_tungstenite::tungstenite::Error),
}

pub struct BusCtx {
    pub folders: Arc<FolderManager>,
    pub fmdm: FmdmHandle,
    pub watch_rx: watch::Receiver<Fmdm>,
}

pub struct Bus {
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl Bus {
    pub async fn bind() -> std::io::Result<Self> {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let local_addr = listener.local_addr()?;
        Ok(Self { listener, local_addr })
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}", self.local_addr)
    }

    /// Accepts connections until `cancel` fires; each connection is handled
    /// in its own spawned task so one slow or misbehaving client never
    /// blocks another (§5 "requests are processed concurrently across
    /// connections").
    pub async fn run(self, ctx: Arc<BusCtx>, cancel: CancellationToken) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("broadcast bus shutting down, no longer accepting connections");
                    return;
                }
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((stream, addr)) => {
                            let ctx = ctx.clone();
                            let cancel = cancel.clone();
                            tokio::spawn(async move {
                                if let Err(err) = handle_connection(stream, ctx, cancel).await {
                                    warn!(%addr, %err, "bus connection ended with error");
                                }
                            });
                        }
                        Err(err) => warn!(%err, "bus accept error"),
                    }
                }
            }
        }
    }
}

async fn handle_connection(stream: TcpStream, ctx: Arc<BusCtx>, cancel: CancellationToken) -> Result<(), BusError> {
    let ws = tokio_tungstenite::accept_async(stream).await?;
    let (mut sink, mut incoming) = ws.split();
    let (outbox_tx, mut outbox_rx) = mpsc::channel::<Message>(OUTBOX_CAPACITY);

    let writer = tokio::spawn(async move {
        while let Some(message) = outbox_rx.recv().await {
            if sink.send(message).await.is_err() {
                break;
            }
        }
    });

    let mut watch_rx = ctx.watch_rx.clone();
    let mut last_downloads: Vec<ModelDownload> = Vec::new();

    'connection: loop {
        tokio::select! {
            _ = cancel.cancelled() => break 'connection,
            changed = watch_rx.changed() => {
                if changed.is_err() {
                    break 'connection;
                }
                let fmdm = watch_rx.borrow().clone();
                for event in diff_download_events(&last_downloads, &fmdm.downloads) {
                    if !push(&outbox_tx, &event).await {
                        break 'connection;
                    }
                }
                last_downloads = fmdm.downloads.clone();
                if !push(&outbox_tx, &ServerMessage::FmdmUpdate { fmdm }).await {
                    break 'connection;
                }
            }
            incoming_message = incoming.next() => {
                match incoming_message {
                    Some(Ok(Message::Text(text))) => {
                        for response in handle_frame(&ctx, &text).await {
                            if !push(&outbox_tx, &response).await {
                                break 'connection;
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break 'connection,
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        debug!(%err, "websocket read error, closing connection");
                        break 'connection;
                    }
                }
            }
        }
    }

    drop(outbox_tx);
    let _ = writer.await;
    Ok(())
}

/// Serializes and enqueues `message`; returns `false` if the outbound queue
/// is full (slow client) or the writer task has gone away, in which case
/// the caller closes the connection rather than blocking on it.
async fn push(outbox_tx: &mpsc::Sender<Message>, message: &ServerMessage) -> bool {
    let frame = match encode(message) {
        Ok(frame) => frame,
        Err(err) => {
            warn!(%err, "failed to encode outgoing wire message, dropping");
            return true;
        }
    };
    match outbox_tx.try_send(Message::Text(frame.into())) {
        Ok(()) => true,
        Err(mpsc::error::TrySendError::Full(_)) => {
            warn!("client outbox full, disconnecting slow client");
            false
        }
        Err(mpsc::error::TrySendError::Closed(_)) => false,
    }
}

async fn handle_frame(ctx: &BusCtx, raw: &str) -> Vec<ServerMessage> {
    let message = match decode_client(raw) {
        Ok(message) => message,
        Err(ProtocolError::UnsupportedMessage) => {
            return vec![ServerMessage::err(extract_id(raw), WireError::new(ErrorKind::UnsupportedMessage, "unrecognized message type"))];
        }
        Err(ProtocolError::Malformed(err)) => {
            return vec![ServerMessage::err(extract_id(raw), WireError::new(ErrorKind::InvalidInput, err.to_string()))];
        }
    };

    match tokio::time::timeout(env::request_timeout(), dispatch(ctx, message.clone())).await {
        Ok(responses) => responses,
        Err(_) => match message.request_id() {
            Some(id) => vec![ServerMessage::err(id, WireError::new(ErrorKind::Timeout, "request timed out"))],
            None => Vec::new(),
        },
    }
}

async fn dispatch(ctx: &BusCtx, message: ClientMessage) -> Vec<ServerMessage> {
    match message {
        ClientMessage::ConnectionInit { .. } => {
            let fmdm = ctx.fmdm.snapshot().await.unwrap_or_default();
            vec![ServerMessage::ConnectionAck, ServerMessage::FmdmUpdate { fmdm }]
        }

        ClientMessage::FolderValidate { id, path } => {
            let result = ctx.folders.validate(&path).await;
            vec![ServerMessage::ok(id, validation_json(&result))]
        }

        ClientMessage::FolderAdd { id, path, model } => match ctx.folders.add_folder(&path, model).await {
            Ok(result) if result.valid => vec![ServerMessage::ok(id, validation_json(&result))],
            Ok(result) => {
                let message = result.message.unwrap_or_else(|| "folder is not valid".to_string());
                vec![ServerMessage::err(id, WireError::new(ErrorKind::FolderConflict, message))]
            }
            Err(err) => vec![ServerMessage::err(id, WireError::new(err.kind(), err.to_string()))],
        },

        ClientMessage::FolderRemove { id, path } => {
            ctx.folders.remove_folder(&path).await;
            vec![ServerMessage::ok(id, serde_json::Value::Null)]
        }

        ClientMessage::FolderRetry { id, path } => {
            if ctx.folders.retry(&path) {
                vec![ServerMessage::ok(id, serde_json::Value::Null)]
            } else {
                vec![ServerMessage::err(id, WireError::new(ErrorKind::FolderNotReady, "folder is not monitored"))]
            }
        }

        ClientMessage::ModelsList { id } => {
            let models: Vec<_> = MODEL_REGISTRY
                .iter()
                .map(|entry| serde_json::json!({"id": entry.id, "origin": entry.origin, "dimension": entry.dimension}))
                .collect();
            vec![ServerMessage::ok(id, serde_json::Value::Array(models))]
        }

        ClientMessage::Ping { id } => vec![ServerMessage::Pong { id }],
    }
}

fn validation_json(result: &fmcp_engine::ValidationResult) -> serde_json::Value {
    serde_json::json!({
        "valid": result.valid,
        "message": result.message,
        "replaces": result.replaces,
    })
}

/// Best-effort extraction of a correlation id from a frame this crate could
/// not fully decode, so even an `unsupported_message`/`invalid_input`
/// response can still be correlated by a well-behaved client.
fn extract_id(raw: &str) -> String {
    serde_json::from_str::<serde_json::Value>(raw)
        .ok()
        .and_then(|value| value.get("id").and_then(|id| id.as_str()).map(str::to_string))
        .unwrap_or_default()
}

/// Derives the four `model_download_*` push events (§4.8) from the change
/// in the FMDM's download list between two snapshots — this crate has no
/// direct subscription to the coordinator, only to the FMDM it mirrors
/// into, so the event stream is reconstructed from that diff.
fn diff_download_events(previous: &[ModelDownload], current: &[ModelDownload]) -> Vec<ServerMessage> {
    let mut events = Vec::new();
    for download in current {
        let prior = previous.iter().find(|d| d.model_id == download.model_id);
        let event = match prior {
            None => Some(ModelDownloadEvent::Start),
            Some(prior) if prior.status != download.status => match download.status {
                fmcp_core::DownloadStatus::Ready => Some(ModelDownloadEvent::Complete),
                fmcp_core::DownloadStatus::Error => Some(ModelDownloadEvent::Error),
                _ => Some(ModelDownloadEvent::Progress),
            },
            Some(prior) if prior.progress != download.progress => Some(ModelDownloadEvent::Progress),
            _ => None,
        };
        if let Some(event) = event {
            events.push(ServerMessage::ModelDownload {
                model_name: download.model_id.clone(),
                event,
                progress: Some(download.progress),
                error: download.error.clone(),
            });
        }
    }
    events
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
