// SPDX-License-Identifier: MIT

use super::*;

fn config() -> SidecarConfig {
    SidecarConfig {
        command: "true".to_string(),
        args: vec![],
        model_id: "all-MiniLM-L6-v2".to_string(),
        max_restarts: 3,
        restart_window: Duration::from_secs(60),
        shutdown_grace: Duration::from_secs(1),
    }
}

#[test]
fn restart_budget_is_enforced_within_window() {
    let tracker = Arc::new(std::sync::Mutex::new(RestartTracker {
        restarts: 0,
        restart_times: VecDeque::new(),
        last_restart_at: None,
        pid: None,
    }));
    let cfg = config();
    let clock = fmcp_core::SystemClock;
    assert!(record_restart(&tracker, &cfg, &clock));
    assert!(record_restart(&tracker, &cfg, &clock));
    assert!(record_restart(&tracker, &cfg, &clock));
    assert!(!record_restart(&tracker, &cfg, &clock));
}

#[test]
fn restart_window_expiry_frees_budget() {
    use fmcp_core::Clock as _;
    let clock = fmcp_core::FakeClock::new();
    let tracker = Arc::new(std::sync::Mutex::new(RestartTracker {
        restarts: 0,
        restart_times: VecDeque::from([clock.now()]),
        last_restart_at: None,
        pid: None,
    }));
    clock.advance(Duration::from_secs(120));
    let cfg = config();
    // The stale entry is outside the window and should be pruned before
    // counting against the budget.
    assert!(record_restart(&tracker, &cfg, &clock));
}

#[tokio::test]
async fn embed_with_empty_texts_short_circuits_without_touching_the_queue() {
    let backend = SidecarBackend::spawn(config(), fmcp_core::SystemClock);
    let result = backend.embed(Priority::Immediate, vec![]).await.expect("empty embed");
    assert!(result.is_empty());
    backend.shutdown().await;
}
