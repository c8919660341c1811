// SPDX-License-Identifier: MIT

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::DaemonError;

/// Resolve state directory: `FMCP_STATE_DIR` > `XDG_STATE_HOME/folder-mcp` >
/// `~/.local/state/folder-mcp`.
pub fn state_dir() -> Result<PathBuf, DaemonError> {
    if let Ok(dir) = std::env::var("FMCP_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("folder-mcp"));
    }
    dirs::home_dir().map(|home| home.join(".local/state/folder-mcp")).ok_or(DaemonError::NoStateDir)
}

/// Request handling budget (§5): 30s default.
pub fn request_timeout() -> Duration {
    env_ms("FMCP_REQUEST_TIMEOUT_MS").unwrap_or(Duration::from_secs(30))
}

/// Single embedding call budget (§5): 60s default.
pub fn embed_timeout() -> Duration {
    env_ms("FMCP_EMBED_TIMEOUT_MS").unwrap_or(Duration::from_secs(60))
}

/// Shutdown drain deadline (§4.9): 10s default.
pub fn drain_timeout() -> Duration {
    env_ms("FMCP_DRAIN_TIMEOUT_MS").unwrap_or(Duration::from_secs(10))
}

/// Base URL for the remote Ollama-compatible backend variant.
pub fn remote_base_url() -> String {
    std::env::var("FMCP_REMOTE_BASE_URL").unwrap_or_else(|_| "http://localhost:11434".to_string())
}

/// Command used to launch a sidecar embedding process. The daemon passes
/// `--model <id>` itself; this only names the executable.
pub fn sidecar_command() -> String {
    std::env::var("FMCP_SIDECAR_COMMAND").unwrap_or_else(|_| "folder-mcp-sidecar".to_string())
}

fn env_ms(name: &str) -> Option<Duration> {
    std::env::var(name).ok().and_then(|s| s.parse::<u64>().ok()).map(Duration::from_millis)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
