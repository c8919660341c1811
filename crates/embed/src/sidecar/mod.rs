// SPDX-License-Identifier: MIT

//! The sidecar `EmbeddingBackend` variant: a child process kept alive
//! across requests, restarted on unexpected exit up to a budget within a
//! rolling window (§4.2).

mod codec;

use crate::backend::{BackendError, BackendStats, EmbeddingBackend, Priority};
use crate::queue::{self, Dispatcher, EmbedJob, QueueHandle};
use async_trait::async_trait;
use codec::SidecarRequest;
use fmcp_core::EmbeddingVector;
use std::collections::{HashMap, VecDeque};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::{oneshot, Mutex as AsyncMutex};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[derive(Debug, Clone)]
pub struct SidecarConfig {
    pub command: String,
    pub args: Vec<String>,
    pub model_id: String,
    pub max_restarts: u32,
    pub restart_window: Duration,
    pub shutdown_grace: Duration,
}

struct RestartTracker {
    restarts: u32,
    restart_times: VecDeque<std::time::Instant>,
    last_restart_at: Option<String>,
    pid: Option<u32>,
}

/// A child process kept alive across requests, with one writer task owning
/// its stdin (the shared-resource invariant from §5).
pub struct SidecarBackend {
    config: SidecarConfig,
    queue: QueueHandle,
    tracker: Arc<std::sync::Mutex<RestartTracker>>,
    cancel: CancellationToken,
    supervisor: AsyncMutex<Option<tokio::task::JoinHandle<()>>>,
}

impl SidecarBackend {
    /// `clock` drives restart-timestamp formatting; callers pass
    /// `SystemClock` in production and `FakeClock` in tests that assert on
    /// restart backoff timing.
    pub fn spawn(config: SidecarConfig, clock: impl fmcp_core::Clock) -> Arc<Self> {
        let (queue_handle, dispatcher) = queue::channel();
        let tracker = Arc::new(std::sync::Mutex::new(RestartTracker {
            restarts: 0,
            restart_times: VecDeque::new(),
            last_restart_at: None,
            pid: None,
        }));
        let cancel = CancellationToken::new();

        let backend = Arc::new(Self {
            config: config.clone(),
            queue: queue_handle,
            tracker: tracker.clone(),
            cancel: cancel.clone(),
            supervisor: AsyncMutex::new(None),
        });

        let handle = tokio::spawn(run_supervisor(config, dispatcher, tracker, cancel, clock));
        // The supervisor task owns the process for the backend's lifetime;
        // stash the handle so `shutdown` can join it.
        if let Ok(mut guard) = backend.supervisor.try_lock() {
            *guard = Some(handle);
        }
        backend
    }
}

#[async_trait]
impl EmbeddingBackend for SidecarBackend {
    async fn initialize(&self, model_id: &str) -> Result<(), BackendError> {
        if model_id != self.config.model_id {
            return Err(BackendError::UnknownModel(model_id.to_string()));
        }
        Ok(())
    }

    async fn embed(&self, priority: Priority, texts: Vec<String>) -> Result<Vec<EmbeddingVector>, BackendError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let (reply, rx) = oneshot::channel();
        self.queue.submit(priority, EmbedJob { texts, reply });
        rx.await.map_err(|_| BackendError::Unavailable("sidecar supervisor task ended".into()))?
    }

    async fn health_check(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    async fn stats(&self) -> BackendStats {
        let tracker = self.tracker.lock().unwrap_or_else(|e| e.into_inner());
        BackendStats {
            backend: "sidecar".to_string(),
            model: self.config.model_id.clone(),
            restarts: tracker.restarts,
            pid: tracker.pid,
            last_restart_at: tracker.last_restart_at.clone(),
        }
    }

    async fn shutdown(&self) {
        self.cancel.cancel();
        if let Some(handle) = self.supervisor.lock().await.take() {
            let _ = tokio::time::timeout(self.config.shutdown_grace, handle).await;
        }
    }
}

/// Owns the child process and the single stdin writer for the backend's
/// lifetime; restarts the child on unexpected exit up to `max_restarts`
/// within `restart_window`.
async fn run_supervisor(
    config: SidecarConfig,
    mut dispatcher: Dispatcher,
    tracker: Arc<std::sync::Mutex<RestartTracker>>,
    cancel: CancellationToken,
    clock: impl fmcp_core::Clock,
) {
    loop {
        if cancel.is_cancelled() {
            return;
        }
        let child = match spawn_child(&config) {
            Ok(child) => child,
            Err(e) => {
                error!(error = %e, "failed to spawn embedding sidecar");
                return;
            }
        };
        {
            let mut t = tracker.lock().unwrap_or_else(|e| e.into_inner());
            t.pid = child.id();
        }

        match run_session(&config, child, &mut dispatcher, &cancel).await {
            SessionOutcome::Cancelled => return,
            SessionOutcome::Crashed => {
                if !record_restart(&tracker, &config, &clock) {
                    error!("embedding sidecar exceeded restart budget, giving up");
                    return;
                }
                warn!("embedding sidecar crashed, restarting");
            }
        }
    }
}

enum SessionOutcome {
    Cancelled,
    Crashed,
}

async fn run_session(
    config: &SidecarConfig,
    mut child: Child,
    dispatcher: &mut Dispatcher,
    cancel: &CancellationToken,
) -> SessionOutcome {
    let mut stdin = match child.stdin.take() {
        Some(s) => s,
        None => return SessionOutcome::Crashed,
    };
    let stdout = match child.stdout.take() {
        Some(s) => s,
        None => return SessionOutcome::Crashed,
    };
    let mut lines = BufReader::new(stdout).lines();
    let mut pending: HashMap<String, oneshot::Sender<Result<Vec<EmbeddingVector>, BackendError>>> =
        HashMap::new();
    let mut next_id: u64 = 0;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                let _ = stdin.shutdown().await;
                let _ = child.start_kill();
                fail_all(&mut pending, "shutting down");
                return SessionOutcome::Cancelled;
            }
            exit = child.wait() => {
                let status = exit.unwrap_or_else(|_| std::process::ExitStatus::default());
                warn!(?status, "embedding sidecar process exited");
                fail_all(&mut pending, "sidecar process exited unexpectedly");
                return SessionOutcome::Crashed;
            }
            job = dispatcher.next() => {
                let Some(job) = job else { return SessionOutcome::Crashed };
                next_id += 1;
                let id = format!("sc-{next_id}");
                let request = SidecarRequest { id: id.clone(), model_id: config.model_id.clone(), texts: job.texts };
                match codec::encode_request(&request) {
                    Ok(line) => {
                        if stdin.write_all(line.as_bytes()).await.is_err() || stdin.write_all(b"\n").await.is_err() {
                            let _ = job.reply.send(Err(BackendError::Unavailable("sidecar stdin closed".into())));
                            fail_all(&mut pending, "sidecar stdin closed");
                            return SessionOutcome::Crashed;
                        }
                        pending.insert(id, job.reply);
                    }
                    Err(e) => {
                        let _ = job.reply.send(Err(BackendError::Unavailable(e.to_string())));
                    }
                }
            }
            line = lines.next_line() => {
                match line {
                    Ok(Some(raw)) => {
                        match codec::decode_response(&raw) {
                            Ok(response) => {
                                if let Some(reply) = pending.remove(&response.id) {
                                    let result = match response.error {
                                        Some(message) => Err(BackendError::Unavailable(message)),
                                        None => Ok(to_vectors(&config.model_id, response.vectors.unwrap_or_default())),
                                    };
                                    let _ = reply.send(result);
                                }
                            }
                            Err(e) => warn!(error = %e, "malformed sidecar response line, ignoring"),
                        }
                    }
                    Ok(None) => {
                        fail_all(&mut pending, "sidecar closed stdout");
                        return SessionOutcome::Crashed;
                    }
                    Err(e) => {
                        error!(error = %e, "error reading from sidecar stdout");
                        fail_all(&mut pending, "sidecar stdout read error");
                        return SessionOutcome::Crashed;
                    }
                }
            }
        }
    }
}

fn to_vectors(model_id: &str, raw: Vec<Vec<f32>>) -> Vec<EmbeddingVector> {
    raw.into_iter()
        .filter_map(|values| {
            let dim = values.len();
            EmbeddingVector::new(model_id, values, dim, "").ok()
        })
        .collect()
}

fn fail_all(
    pending: &mut HashMap<String, oneshot::Sender<Result<Vec<EmbeddingVector>, BackendError>>>,
    message: &str,
) {
    for (_, reply) in pending.drain() {
        let _ = reply.send(Err(BackendError::Unavailable(message.to_string())));
    }
}

fn spawn_child(config: &SidecarConfig) -> std::io::Result<Child> {
    Command::new(&config.command)
        .args(&config.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
}

/// Records a restart attempt against the rolling window; returns `false` if
/// the budget within the window is exhausted.
fn record_restart(
    tracker: &Arc<std::sync::Mutex<RestartTracker>>,
    config: &SidecarConfig,
    clock: &impl fmcp_core::Clock,
) -> bool {
    let now = clock.now();
    let mut t = tracker.lock().unwrap_or_else(|e| e.into_inner());
    while let Some(&front) = t.restart_times.front() {
        if now.duration_since(front) > config.restart_window {
            t.restart_times.pop_front();
        } else {
            break;
        }
    }
    if t.restart_times.len() as u32 >= config.max_restarts {
        return false;
    }
    t.restart_times.push_back(now);
    t.restarts += 1;
    t.last_restart_at = Some(clock.now_rfc3339());
    info!(restarts = t.restarts, "restarting embedding sidecar");
    true
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
