// SPDX-License-Identifier: MIT

//! Daemon Supervisor (C10): owns the startup/shutdown sequence and process
//! exit code (§4.9, §6.5). Acquiring the singleton lock is split from
//! running so `main` can give a friendly "already running" message before
//! entering the async runtime's shutdown machinery.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use fmcp_core::{DaemonInfo, ModelInfo};
use fmcp_embed::MODEL_REGISTRY;
use fmcp_store::{FmdmStore, PersistedConfig};
use fs2::FileExt;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::bus::{Bus, BusCtx};
use crate::discovery::DiscoveryFile;
use crate::env;
use crate::error::DaemonError;
use crate::folder_manager::FolderManager;

const LOCK_FILE_NAME: &str = "daemon.lock";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Exit code returned to the OS after a clean shutdown triggered by a
/// signal, distinct from the codes `DaemonError::exit_code` covers (§6.5).
pub const EXIT_CODE_CLEAN: i32 = 0;
pub const EXIT_CODE_SIGNAL: i32 = 130;

/// Holds the exclusive lock file for as long as this process is the one
/// live daemon. Dropping it releases the lock.
pub struct Supervisor {
    state_dir: PathBuf,
    lock_file: std::fs::File,
}

impl Supervisor {
    /// Acquires the singleton lock, or fails with `DaemonError::LockFailed`
    /// if another live daemon already holds it. This is the sole
    /// race-free check; the discovery file is advisory only.
    pub fn acquire(state_dir: PathBuf) -> Result<Self, DaemonError> {
        std::fs::create_dir_all(&state_dir)?;
        let lock_path = state_dir.join(LOCK_FILE_NAME);
        let lock_file = std::fs::OpenOptions::new().create(true).write(true).open(&lock_path)?;
        lock_file.try_lock_exclusive().map_err(DaemonError::LockFailed)?;
        Ok(Self { state_dir, lock_file })
    }

    /// Runs the daemon to completion: startup, serve until a shutdown
    /// signal arrives, then an orderly drain. Returns the process exit code.
    pub async fn run(self) -> Result<i32, DaemonError> {
        let config_path = self.state_dir.join(CONFIG_FILE_NAME);
        let config = PersistedConfig::load(&config_path)?;

        let (fmdm, watch_rx, store) = FmdmStore::spawn_channels(256);
        tokio::spawn(store.run());

        let models: Vec<ModelInfo> =
            MODEL_REGISTRY.iter().map(|entry| ModelInfo { id: entry.id.to_string(), origin: entry.origin.to_string(), dimension: entry.dimension }).collect();
        fmdm.set_models(models).await;

        let bus = Bus::bind().await.map_err(DaemonError::BindFailed)?;
        let ws_url = bus.ws_url();

        let daemon_info = DaemonInfo { pid: std::process::id(), ws_url: ws_url.clone(), version: env!("CARGO_PKG_VERSION").to_string() };
        fmdm.set_daemon_info(daemon_info).await;

        let discovery = DiscoveryFile {
            pid: std::process::id(),
            ws_url: ws_url.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: chrono::Utc::now().to_rfc3339(),
        };
        discovery.write(&self.state_dir)?;

        let folders = Arc::new(FolderManager::new(fmdm.clone(), config_path, config));
        folders.start_persisted_folders().await;

        let cancel = CancellationToken::new();
        let bus_ctx = Arc::new(BusCtx { folders: folders.clone(), fmdm: fmdm.clone(), watch_rx });
        let bus_task = tokio::spawn(bus.run(bus_ctx, cancel.clone()));

        info!(%ws_url, "daemon listening");
        let exit_code = wait_for_shutdown_signal().await;

        cancel.cancel();
        let _ = bus_task.await;

        if tokio::time::timeout(env::drain_timeout(), folders.stop_all()).await.is_err() {
            warn!("timed out draining folder pipelines, shutting down backends anyway");
        }
        folders.shutdown_backends().await;

        DiscoveryFile::remove(&self.state_dir);
        Ok(exit_code)
    }
}

/// Waits for SIGINT/SIGTERM (Unix) and returns the exit code the process
/// should report for that shutdown (§6.5: `130` for a signal).
async fn wait_for_shutdown_signal() -> i32 {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut terminate = match signal(SignalKind::terminate()) {
            Ok(stream) => stream,
            Err(err) => {
                warn!(%err, "failed to install SIGTERM handler, falling back to Ctrl-C only");
                let _ = tokio::signal::ctrl_c().await;
                return EXIT_CODE_SIGNAL;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = terminate.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    EXIT_CODE_SIGNAL
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
