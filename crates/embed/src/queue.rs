// SPDX-License-Identifier: MIT

//! The two-class priority queue shared by backend variants that need it
//! (currently only the sidecar — the remote variant ignores priority
//! entirely since the remote service already multiplexes).
//!
//! Ordering guarantee (§4.2, §5): FIFO within a priority class; across
//! classes, `immediate` strictly precedes `batch`. A batch item already
//! popped and in flight is never cancelled — preemption only withholds the
//! *next* batch item while immediate work is pending.

use crate::backend::{BackendError, Priority};
use fmcp_core::EmbeddingVector;
use tokio::sync::{mpsc, oneshot};

pub struct EmbedJob {
    pub texts: Vec<String>,
    pub reply: oneshot::Sender<Result<Vec<EmbeddingVector>, BackendError>>,
}

#[derive(Clone)]
pub struct QueueHandle {
    immediate_tx: mpsc::UnboundedSender<EmbedJob>,
    batch_tx: mpsc::UnboundedSender<EmbedJob>,
}

impl QueueHandle {
    pub fn submit(&self, priority: Priority, job: EmbedJob) {
        let tx = match priority {
            Priority::Immediate => &self.immediate_tx,
            Priority::Batch => &self.batch_tx,
        };
        // The dispatcher outlives every handle for the backend's lifetime;
        // a send failure only happens during shutdown races and the caller
        // observes it via the dropped reply channel.
        let _ = tx.send(job);
    }
}

/// Owned by the single task that writes to the sidecar's stdin. Not `Clone`
/// — there is exactly one dispatcher per backend instance.
pub struct Dispatcher {
    immediate_rx: mpsc::UnboundedReceiver<EmbedJob>,
    batch_rx: mpsc::UnboundedReceiver<EmbedJob>,
}

pub fn channel() -> (QueueHandle, Dispatcher) {
    let (immediate_tx, immediate_rx) = mpsc::unbounded_channel();
    let (batch_tx, batch_rx) = mpsc::unbounded_channel();
    (QueueHandle { immediate_tx, batch_tx }, Dispatcher { immediate_rx, batch_rx })
}

impl Dispatcher {
    /// Pops the next job to dispatch: immediate always wins over batch, and
    /// within a class this is the channel's own FIFO order. Returns `None`
    /// once both channels are closed and drained.
    pub async fn next(&mut self) -> Option<EmbedJob> {
        if let Ok(job) = self.immediate_rx.try_recv() {
            return Some(job);
        }
        tokio::select! {
            biased;
            Some(job) = self.immediate_rx.recv() => Some(job),
            Some(job) = self.batch_rx.recv() => Some(job),
            else => None,
        }
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
