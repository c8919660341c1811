// SPDX-License-Identifier: MIT

//! `fmcpd`: the folder-mcp daemon binary.

use fmcp_daemon::discovery::DiscoveryFile;
use fmcp_daemon::{env, DaemonError, Supervisor};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(err) => {
            report_startup_failure(&err);
            err.exit_code()
        }
    };
    std::process::exit(exit_code);
}

async fn run() -> Result<i32, DaemonError> {
    let state_dir = env::state_dir()?;
    let supervisor = Supervisor::acquire(state_dir)?;
    supervisor.run().await
}

fn report_startup_failure(err: &DaemonError) {
    if let DaemonError::LockFailed(_) = err {
        if let Ok(state_dir) = env::state_dir() {
            if let Ok(Some(discovery)) = DiscoveryFile::read(&state_dir) {
                eprintln!("folder-mcp daemon already running at {} (pid {})", discovery.ws_url, discovery.pid);
                return;
            }
        }
    }
    eprintln!("folder-mcp daemon failed to start: {err}");
}
