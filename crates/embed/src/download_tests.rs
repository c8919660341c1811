// SPDX-License-Identifier: MIT

use super::*;

use std::sync::atomic::{AtomicUsize, Ordering};

#[tokio::test]
async fn concurrent_begin_calls_collapse_to_one_download() {
    let coordinator = ModelDownloadCoordinator::new();
    let starts = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let coordinator = coordinator.clone();
        let starts = starts.clone();
        handles.push(tokio::spawn(async move {
            if coordinator.begin("m1") {
                starts.fetch_add(1, Ordering::SeqCst);
            }
            coordinator.wait_for("m1").await
        }));
    }

    // Give every task a chance to call begin() before we complete it.
    tokio::task::yield_now().await;
    coordinator.complete("m1");

    let mut outcomes = Vec::new();
    for h in handles {
        outcomes.push(h.await.expect("task"));
    }

    assert_eq!(starts.load(Ordering::SeqCst), 1);
    assert!(outcomes.iter().all(|o| *o == Some(DownloadOutcome::Ready)));
}

#[tokio::test]
async fn failed_download_notifies_all_waiters_with_error() {
    let coordinator = ModelDownloadCoordinator::new();
    assert!(coordinator.begin("m1"));
    let waiter = tokio::spawn({
        let coordinator = coordinator.clone();
        async move { coordinator.wait_for("m1").await }
    });
    tokio::task::yield_now().await;
    coordinator.fail("m1", "disk full");

    let outcome = waiter.await.expect("task");
    assert_eq!(outcome, Some(DownloadOutcome::Error("disk full".into())));
}

#[tokio::test]
async fn wait_for_unknown_model_is_none() {
    let coordinator = ModelDownloadCoordinator::new();
    assert_eq!(coordinator.wait_for("nope").await, None);
}

#[tokio::test]
async fn wait_for_already_terminal_entry_returns_immediately() {
    let coordinator = ModelDownloadCoordinator::new();
    coordinator.begin("m1");
    coordinator.complete("m1");
    assert_eq!(coordinator.wait_for("m1").await, Some(DownloadOutcome::Ready));
}

#[test]
fn remove_if_terminal_only_prunes_finished_entries() {
    let coordinator = ModelDownloadCoordinator::new();
    coordinator.begin("m1");
    coordinator.remove_if_terminal("m1");
    assert!(coordinator.snapshot("m1").is_some());

    coordinator.complete("m1");
    coordinator.remove_if_terminal("m1");
    assert!(coordinator.snapshot("m1").is_none());
}
