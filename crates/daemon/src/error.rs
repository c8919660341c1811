// SPDX-License-Identifier: MIT

//! Top-level daemon errors and the process exit codes they imply (§6.5).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("could not determine state directory")]
    NoStateDir,

    #[error("failed to acquire singleton lock: another daemon instance is already running")]
    LockFailed(#[source] std::io::Error),

    #[error("failed to bind broadcast bus socket: {0}")]
    BindFailed(std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] fmcp_store::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DaemonError {
    /// `0` clean shutdown, `1` another instance running, `2` unrecoverable
    /// startup error, `130` interrupted by signal (§6.5). This method only
    /// ever returns `1` or `2`; the signal/clean-shutdown codes are decided
    /// by the supervisor's run loop, not by an error path.
    pub fn exit_code(&self) -> i32 {
        match self {
            DaemonError::LockFailed(_) => 1,
            _ => 2,
        }
    }
}
