//! Workspace-level end-to-end spec: spawns the real `fmcpd` binary, confirms
//! it advertises itself via the discovery file, exercises it through the
//! real `fmcp` CLI binary, then sends it SIGTERM and confirms it drains and
//! removes the discovery file before exiting.

use assert_cmd::cargo::cargo_bin;
use std::process::{Child, Command};
use std::time::{Duration, Instant};

fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(100));
    }
    condition()
}

struct DaemonGuard {
    child: Child,
}

impl Drop for DaemonGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[test]
#[serial_test::serial]
fn daemon_advertises_itself_and_shuts_down_cleanly_on_sigterm() {
    let state_dir = tempfile::tempdir().expect("tempdir");

    let child = Command::new(cargo_bin("fmcpd"))
        .env("FMCP_STATE_DIR", state_dir.path())
        .spawn()
        .expect("spawn fmcpd");
    let mut guard = DaemonGuard { child };

    let discovery_path = state_dir.path().join("daemon.json");
    assert!(wait_until(Duration::from_secs(10), || discovery_path.exists()), "daemon never wrote a discovery file");

    let discovery: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&discovery_path).expect("read discovery file")).expect("parse discovery file");
    assert!(discovery["pid"].as_u64().unwrap_or(0) > 0);
    assert!(discovery["wsUrl"].as_str().unwrap_or("").starts_with("ws://127.0.0.1:"));

    let status = Command::new(cargo_bin("fmcp")).env("FMCP_STATE_DIR", state_dir.path()).arg("status").output().expect("run fmcp status");
    assert!(status.status.success(), "fmcp status failed: {}", String::from_utf8_lossy(&status.stderr));
    let snapshot: serde_json::Value = serde_json::from_slice(&status.stdout).expect("parse status output");
    assert!(snapshot.get("version").is_some());
    assert!(snapshot["folders"].as_array().unwrap_or(&Vec::new()).is_empty());

    send_sigterm(guard.child.id());

    assert!(wait_until(Duration::from_secs(10), || !discovery_path.exists()), "daemon did not remove its discovery file on shutdown");

    let exit_status = wait_for_exit(&mut guard.child, Duration::from_secs(10)).expect("daemon did not exit after SIGTERM");
    assert_eq!(exit_status.code(), Some(130));
}

#[test]
#[serial_test::serial]
fn fmcp_status_reports_not_running_when_no_daemon_is_present() {
    let state_dir = tempfile::tempdir().expect("tempdir");
    let status = Command::new(cargo_bin("fmcp")).env("FMCP_STATE_DIR", state_dir.path()).arg("status").output().expect("run fmcp status");
    assert!(!status.status.success());
    assert!(String::from_utf8_lossy(&status.stderr).contains("not running"));
}

fn send_sigterm(pid: u32) {
    let status = Command::new("kill").arg("-TERM").arg(pid.to_string()).status().expect("invoke kill");
    assert!(status.success(), "kill -TERM failed for pid {pid}");
}

fn wait_for_exit(child: &mut Child, timeout: Duration) -> Option<std::process::ExitStatus> {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if let Ok(Some(status)) = child.try_wait() {
            return Some(status);
        }
        std::thread::sleep(Duration::from_millis(100));
    }
    None
}
