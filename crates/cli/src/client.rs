// SPDX-License-Identifier: MIT

//! Thin WebSocket client for the broadcast bus. This crate owns no daemon
//! state and no indexing logic — it is a wire-protocol client like any
//! other observer (§6.6).

use anyhow::{anyhow, Context, Result};
use fmcp_daemon::discovery::DiscoveryFile;
use fmcp_wire::{decode_server, encode, ClientMessage, ServerMessage};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

pub struct DaemonClient {
    socket: WebSocketStream<MaybeTlsStream<TcpStream>>,
    /// A message read while draining `connection.ack` that turned out to be
    /// something the caller still needs (e.g. the first `fmdm.update`).
    pending: Option<ServerMessage>,
}

impl DaemonClient {
    /// Reads the discovery file and connects. Fails with a clear message if
    /// no daemon appears to be running.
    pub async fn connect() -> Result<Self> {
        let state_dir = fmcp_daemon::env::state_dir().context("could not determine state directory")?;
        let discovery = DiscoveryFile::read(&state_dir)
            .context("could not read discovery file")?
            .ok_or_else(|| anyhow!("daemon is not running (no discovery file at {})", state_dir.display()))?;

        let (socket, _response) =
            tokio_tungstenite::connect_async(&discovery.ws_url).await.with_context(|| format!("could not connect to {}", discovery.ws_url))?;

        let mut client = Self { socket, pending: None };
        client.send(&ClientMessage::ConnectionInit { client_type: "fmcp-cli".to_string() }).await?;
        // Drain the unsolicited connection.ack; the first fmdm.update is left
        // for the caller to consume via `next_update`/`request`.
        loop {
            match client.recv().await? {
                ServerMessage::ConnectionAck => continue,
                other => {
                    client.pending = Some(other);
                    break;
                }
            }
        }
        Ok(client)
    }

    async fn send(&mut self, message: &ClientMessage) -> Result<()> {
        let frame = encode(message).context("failed to encode request")?;
        self.socket.send(Message::Text(frame.into())).await.context("failed to send request")?;
        Ok(())
    }

    async fn recv(&mut self) -> Result<ServerMessage> {
        loop {
            match self.socket.next().await {
                Some(Ok(Message::Text(text))) => return decode_server(&text).context("failed to decode server message"),
                Some(Ok(_)) => continue,
                Some(Err(err)) => return Err(anyhow!("websocket error: {err}")),
                None => return Err(anyhow!("connection closed by daemon")),
            }
        }
    }

    /// Sends a correlated request and waits for its matching response,
    /// ignoring any `fmdm.update`/`model_download_*` pushes interleaved
    /// ahead of it.
    pub async fn request(&mut self, message: ClientMessage) -> Result<ServerMessage> {
        let id = message.request_id().map(str::to_string);
        self.send(&message).await?;
        loop {
            let response = self.next_message().await?;
            match (&response, &id) {
                (ServerMessage::Response { id: got, .. }, Some(expected)) if got == expected => return Ok(response),
                _ => continue,
            }
        }
    }

    /// Returns the next `fmdm.update`, blocking until one arrives. Used by
    /// `status` (once) and `watch` (in a loop).
    pub async fn next_update(&mut self) -> Result<fmcp_core::Fmdm> {
        loop {
            if let ServerMessage::FmdmUpdate { fmdm } = self.next_message().await? {
                return Ok(fmdm);
            }
        }
    }

    async fn next_message(&mut self) -> Result<ServerMessage> {
        if let Some(pending) = self.pending.take() {
            return Ok(pending);
        }
        self.recv().await
    }
}
