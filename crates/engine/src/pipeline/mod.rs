// SPDX-License-Identifier: MIT

//! Folder Pipeline (C7): one actor per monitored folder, fully isolated
//! from its siblings (§4.6). Owns the folder's `VectorStore` exclusively —
//! single-writer discipline, same as the FMDM store's own command-loop
//! actor in `fmcp-store`.

use crate::chunker::{chunk_text, ChunkerConfig};
use crate::error::PipelineError;
use crate::parse::{extension_of, DocumentParser};
use crate::scan::{reconcile, scan_folder};
use crate::watcher::{FileWatcher, NotifyWatcher};
use fmcp_core::{Chunk, EmbeddingVector, Fingerprint, FolderStatus};
use fmcp_embed::{BackendError, DownloadOutcome, EmbeddingBackend, ModelDownloadCoordinator, Priority};
use fmcp_store::{FmdmHandle, ScoredChunk, VectorStore};
use futures_util::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, warn};

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub path: PathBuf,
    pub model: String,
    pub chunker: ChunkerConfig,
    /// Texts submitted per `embed()` call.
    pub embed_batch_size: usize,
    /// Upper bound on files with an embed call in flight at once (§4.6 step 4).
    pub max_files_in_flight: usize,
    pub watch_debounce: Duration,
    pub extra_ignores: Vec<String>,
}

impl PipelineConfig {
    pub fn new(path: PathBuf, model: impl Into<String>) -> Self {
        Self {
            path,
            model: model.into(),
            chunker: ChunkerConfig::default(),
            embed_batch_size: 32,
            max_files_in_flight: 4,
            watch_debounce: Duration::from_secs(1),
            extra_ignores: Vec::new(),
        }
    }
}

enum PipelineCommand {
    Retry,
    Search { query: String, k: usize, reply: oneshot::Sender<Result<Vec<ScoredChunk>, PipelineError>> },
    Stop { reply: oneshot::Sender<()> },
}

/// Cheaply cloneable handle to a running pipeline actor.
#[derive(Clone)]
pub struct PipelineHandle {
    tx: mpsc::Sender<PipelineCommand>,
}

impl PipelineHandle {
    /// No-op unless the pipeline is currently in `error` (§4.6: "error →
    /// scanning only on explicit user retry").
    pub async fn retry(&self) {
        let _ = self.tx.send(PipelineCommand::Retry).await;
    }

    pub async fn search(&self, query: impl Into<String>, k: usize) -> Result<Vec<ScoredChunk>, PipelineError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(PipelineCommand::Search { query: query.into(), k, reply })
            .await
            .map_err(|_| PipelineError::NotReady)?;
        rx.await.map_err(|_| PipelineError::NotReady)?
    }

    pub async fn stop(&self) {
        let (reply, rx) = oneshot::channel();
        if self.tx.send(PipelineCommand::Stop { reply }).await.is_ok() {
            let _ = rx.await;
        }
    }
}

/// Owns the folder's vector store for the life of the pipeline; the FMDM
/// only ever sees this actor's status/progress updates, never the store
/// directly.
pub struct FolderPipeline {
    config: PipelineConfig,
    fmdm: FmdmHandle,
    backend: Arc<dyn EmbeddingBackend>,
    downloads: ModelDownloadCoordinator,
    store: Box<dyn VectorStore>,
    parser: Arc<dyn DocumentParser>,
    inbox: mpsc::Receiver<PipelineCommand>,
    status: FolderStatus,
}

impl FolderPipeline {
    pub fn spawn(
        config: PipelineConfig,
        fmdm: FmdmHandle,
        backend: Arc<dyn EmbeddingBackend>,
        downloads: ModelDownloadCoordinator,
        store: Box<dyn VectorStore>,
        parser: Arc<dyn DocumentParser>,
    ) -> PipelineHandle {
        let (tx, rx) = mpsc::channel(32);
        let pipeline =
            FolderPipeline { config, fmdm, backend, downloads, store, parser, inbox: rx, status: FolderStatus::Pending };
        tokio::spawn(pipeline.run());
        PipelineHandle { tx }
    }

    async fn run(mut self) {
        loop {
            self.set_status(FolderStatus::ValidatingModel).await;
            if let Err(err) = self.ensure_model_ready().await {
                self.fail(err.to_string()).await;
                if self.error_loop().await {
                    continue;
                }
                return;
            }

            if let Err(err) = self.index_once().await {
                self.fail(err.to_string()).await;
                if self.error_loop().await {
                    continue;
                }
                return;
            }

            self.set_status(FolderStatus::Ready).await;
            self.set_status(FolderStatus::Watching).await;
            if self.watch_loop().await {
                continue;
            }
            return;
        }
    }

    /// Idempotent per the backend contract; on failure, coordinates a
    /// single-flight download via C4 and retries once it resolves.
    async fn ensure_model_ready(&mut self) -> Result<(), PipelineError> {
        if self.backend.initialize(&self.config.model).await.is_ok() {
            return Ok(());
        }

        self.set_status(FolderStatus::DownloadingModel).await;
        if self.downloads.begin(&self.config.model) {
            self.mirror_download_add().await;
            self.drive_download().await
        } else {
            match self.downloads.wait_for(&self.config.model).await {
                Some(DownloadOutcome::Ready) => {
                    self.backend.initialize(&self.config.model).await.map_err(PipelineError::from)
                }
                Some(DownloadOutcome::Error(message)) => {
                    Err(PipelineError::Backend(BackendError::ModelDownloadFailed(message)))
                }
                None => self.backend.initialize(&self.config.model).await.map_err(PipelineError::from),
            }
        }
    }

    /// This task "won" the single-flight race; retries `initialize` with
    /// backoff, reporting progress to C4 so other waiters' FMDM view
    /// updates too.
    async fn drive_download(&mut self) -> Result<(), PipelineError> {
        const MAX_ATTEMPTS: u32 = 5;
        const RETRY_DELAY: Duration = Duration::from_secs(2);

        for attempt in 1..=MAX_ATTEMPTS {
            let progress = ((attempt - 1) * 100 / MAX_ATTEMPTS) as u8;
            self.downloads.update_progress(&self.config.model, progress, None);
            self.mirror_download_update().await;
            match self.backend.initialize(&self.config.model).await {
                Ok(()) => {
                    self.downloads.complete(&self.config.model);
                    self.mirror_download_update().await;
                    self.fmdm.remove_download(self.config.model.clone()).await;
                    return Ok(());
                }
                Err(BackendError::UnknownModel(id)) => {
                    let message = format!("unknown model id: {id}");
                    self.downloads.fail(&self.config.model, message);
                    self.mirror_download_update().await;
                    self.fmdm.remove_download(self.config.model.clone()).await;
                    return Err(PipelineError::Backend(BackendError::UnknownModel(id)));
                }
                Err(err) if attempt < MAX_ATTEMPTS => {
                    warn!(%err, attempt, model = %self.config.model, "model not ready yet, retrying");
                    tokio::time::sleep(RETRY_DELAY).await;
                }
                Err(err) => {
                    self.downloads.fail(&self.config.model, err.to_string());
                    self.mirror_download_update().await;
                    self.fmdm.remove_download(self.config.model.clone()).await;
                    return Err(PipelineError::from(err));
                }
            }
        }
        unreachable!("loop always returns by the final attempt")
    }

    /// Publishes the just-created coordinator entry into the FMDM so the
    /// bus can derive a `model_download_start` event from it (§4.8).
    async fn mirror_download_add(&self) {
        if let Some(download) = self.downloads.snapshot(&self.config.model) {
            self.fmdm.add_download(download).await;
        }
    }

    /// Publishes the coordinator's current state into the FMDM so the bus
    /// can derive `model_download_progress/complete/error` from the change
    /// (§4.8). A no-op if this pipeline never won the single-flight race.
    async fn mirror_download_update(&self) {
        if let Some(download) = self.downloads.snapshot(&self.config.model) {
            self.fmdm.update_download(download).await;
        }
    }

    /// Scan, reconcile, parse/chunk, embed, and persist (§4.6 steps 1-5).
    async fn index_once(&mut self) -> Result<(), PipelineError> {
        self.set_status(FolderStatus::Scanning).await;
        let current = scan_folder(&self.config.path, self.parser.as_ref(), &self.config.extra_ignores)?;
        let stored = self.store.list_fingerprints();
        let (to_index, to_delete) = reconcile(&current, &stored);

        for path in &to_delete {
            self.store.delete_by_path(path)?;
        }

        self.set_status(FolderStatus::Indexing).await;
        let total = to_index.len();
        self.fmdm.update_folder_progress(self.config.path.clone(), 0, total).await;
        if total == 0 {
            return Ok(());
        }

        let backend = self.backend.clone();
        let parser = self.parser.clone();
        let chunker = self.config.chunker;
        let embed_batch_size = self.config.embed_batch_size;
        let concurrency = self.config.max_files_in_flight.max(1);

        let mut outcomes = stream::iter(to_index)
            .map(|path| {
                let backend = backend.clone();
                let parser = parser.clone();
                let fingerprint = current.get(&path).cloned();
                async move {
                    let outcome = index_one_file(&path, fingerprint, parser.as_ref(), backend.as_ref(), &chunker, embed_batch_size).await;
                    (path, outcome)
                }
            })
            .buffer_unordered(concurrency);

        let mut completed = 0usize;
        while let Some((path, outcome)) = outcomes.next().await {
            match outcome? {
                FileOutcome::Indexed { fingerprint, chunks, vectors } => {
                    self.store.upsert_chunks(chunks, vectors)?;
                    self.store.record_fingerprint(fingerprint)?;
                }
                FileOutcome::Empty { fingerprint } => {
                    warn!(?path, "file produced no chunks, recording fingerprint only");
                    self.store.record_fingerprint(fingerprint)?;
                }
                FileOutcome::ParseError => {
                    warn!(?path, "per-file parse error, continuing with the rest of the folder");
                }
            }
            completed += 1;
            self.fmdm.update_folder_progress(self.config.path.clone(), completed, total).await;
        }
        Ok(())
    }

    /// Returns `true` if the folder should restart from `validating-model`
    /// (a retry was requested), `false` if it was stopped.
    async fn watch_loop(&mut self) -> bool {
        let Some(mut watcher) = self.establish_watcher() else {
            self.fail("failed to start file watcher").await;
            return self.error_loop().await;
        };
        let mut watcher_failed_once = false;

        loop {
            tokio::select! {
                cmd = self.inbox.recv() => match cmd {
                    Some(PipelineCommand::Retry) => {}
                    Some(PipelineCommand::Search { query, k, reply }) => {
                        let _ = reply.send(self.run_search(&query, k).await);
                    }
                    Some(PipelineCommand::Stop { reply }) => {
                        self.set_status(FolderStatus::Stopping).await;
                        self.set_status(FolderStatus::Terminated).await;
                        let _ = reply.send(());
                        return false;
                    }
                    None => return false,
                },
                event = watcher.next() => match event {
                    Some(_) => {
                        if let Err(err) = self.index_once().await {
                            self.fail(err.to_string()).await;
                            return self.error_loop().await;
                        }
                        self.set_status(FolderStatus::Watching).await;
                    }
                    None => {
                        if watcher_failed_once {
                            self.fail("file watcher failed twice, giving up").await;
                            return self.error_loop().await;
                        }
                        warn!(path = ?self.config.path, "file watcher stream ended, re-establishing once");
                        watcher_failed_once = true;
                        match self.establish_watcher() {
                            Some(w) => watcher = w,
                            None => {
                                self.fail("failed to re-establish file watcher").await;
                                return self.error_loop().await;
                            }
                        }
                    }
                },
            }
        }
    }

    fn establish_watcher(&self) -> Option<Box<dyn FileWatcher>> {
        match NotifyWatcher::new(&self.config.path, self.config.watch_debounce) {
            Ok(watcher) => Some(Box::new(watcher)),
            Err(err) => {
                error!(%err, path = ?self.config.path, "failed to start file watcher");
                None
            }
        }
    }

    /// Accepts commands while `error`. Returns `true` on an explicit retry
    /// request, `false` if stopped (§4.6: "error → scanning only on
    /// explicit user retry; never automatically").
    async fn error_loop(&mut self) -> bool {
        while let Some(cmd) = self.inbox.recv().await {
            match cmd {
                PipelineCommand::Retry => return true,
                PipelineCommand::Search { reply, .. } => {
                    let _ = reply.send(Err(PipelineError::NotReady));
                }
                PipelineCommand::Stop { reply } => {
                    self.set_status(FolderStatus::Stopping).await;
                    self.set_status(FolderStatus::Terminated).await;
                    let _ = reply.send(());
                    return false;
                }
            }
        }
        false
    }

    async fn run_search(&mut self, query: &str, k: usize) -> Result<Vec<ScoredChunk>, PipelineError> {
        if !self.status.is_queryable() {
            return Err(PipelineError::NotReady);
        }
        let vectors = self.backend.embed(Priority::Immediate, vec![query.to_string()]).await?;
        let Some(query_vector) = vectors.into_iter().next() else {
            return Ok(Vec::new());
        };
        Ok(self.store.search(&query_vector, k))
    }

    async fn set_status(&mut self, status: FolderStatus) {
        self.status = status;
        self.fmdm.update_folder_status(self.config.path.clone(), status).await;
    }

    async fn fail(&mut self, message: impl Into<String>) {
        self.status = FolderStatus::Error;
        self.fmdm.set_folder_error(self.config.path.clone(), message).await;
    }
}

enum FileOutcome {
    Indexed { fingerprint: Fingerprint, chunks: Vec<Chunk>, vectors: Vec<EmbeddingVector> },
    Empty { fingerprint: Fingerprint },
    ParseError,
}

const EMBED_RETRY_ATTEMPTS: u32 = 3;

async fn index_one_file(
    path: &Path,
    current_fingerprint: Option<Fingerprint>,
    parser: &dyn DocumentParser,
    backend: &dyn EmbeddingBackend,
    chunker: &ChunkerConfig,
    embed_batch_size: usize,
) -> Result<FileOutcome, PipelineError> {
    let Some(fingerprint) = current_fingerprint else {
        return Ok(FileOutcome::ParseError);
    };

    let extension = extension_of(path).unwrap_or_default();
    if !parser.supports(&extension) {
        return Ok(FileOutcome::ParseError);
    }

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(?path, %err, "failed to read file, skipping");
            return Ok(FileOutcome::ParseError);
        }
    };

    let text = match parser.parse(path, &bytes) {
        Ok(text) => text,
        Err(err) => {
            warn!(?path, %err, "parse error, skipping file");
            return Ok(FileOutcome::ParseError);
        }
    };

    let chunks = chunk_text(&text, path, &extension, chunker);
    if chunks.is_empty() {
        return Ok(FileOutcome::Empty { fingerprint });
    }

    let mut vectors = Vec::with_capacity(chunks.len());
    for batch in chunks.chunks(embed_batch_size.max(1)) {
        let texts: Vec<String> = batch.iter().map(|c| c.content.clone()).collect();
        vectors.extend(embed_with_retry(backend, texts).await?);
    }

    if vectors.len() != chunks.len() {
        return Err(PipelineError::Backend(BackendError::Unavailable(
            "backend returned a different number of vectors than chunks submitted".to_string(),
        )));
    }
    Ok(FileOutcome::Indexed { fingerprint, chunks, vectors })
}

async fn embed_with_retry(backend: &dyn EmbeddingBackend, texts: Vec<String>) -> Result<Vec<EmbeddingVector>, PipelineError> {
    let mut delay = Duration::from_millis(250);
    for attempt in 1..=EMBED_RETRY_ATTEMPTS {
        match backend.embed(Priority::Batch, texts.clone()).await {
            Ok(vectors) => return Ok(vectors),
            Err(err) if attempt < EMBED_RETRY_ATTEMPTS => {
                warn!(%err, attempt, "embedding batch failed, retrying with backoff");
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
            Err(err) => return Err(PipelineError::from(err)),
        }
    }
    unreachable!("loop always returns by the final attempt")
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
