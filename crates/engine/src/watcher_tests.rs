// SPDX-License-Identifier: MIT

use super::*;

use tempfile::tempdir;
use tokio::time::timeout;

#[tokio::test]
async fn watcher_reports_a_created_file() {
    let dir = tempdir().expect("tempdir");
    let mut watcher = NotifyWatcher::new(dir.path(), Duration::from_millis(100)).expect("watcher");
    // give the watcher thread a moment to attach before we perturb the tree
    tokio::time::sleep(Duration::from_millis(50)).await;
    std::fs::write(dir.path().join("new.txt"), b"hi").expect("write");

    let event = timeout(Duration::from_secs(5), watcher.next()).await.expect("timed out").expect("event");
    assert_eq!(event.kind, ChangeKind::Created);
    assert!(event.path.ends_with("new.txt"));
}
