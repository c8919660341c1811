// SPDX-License-Identifier: MIT

use super::*;

fn spawn() -> (FmdmHandle, watch::Receiver<Fmdm>) {
    let (handle, watch_rx, store) = FmdmStore::spawn_channels(16);
    tokio::spawn(store.run());
    (handle, watch_rx)
}

#[tokio::test]
async fn add_folder_bumps_version_and_publishes() {
    let (handle, mut watch_rx) = spawn();
    handle.add_folder(Folder::new(PathBuf::from("/a/b"), "m1")).await;
    watch_rx.changed().await.expect("publish");
    let fmdm = watch_rx.borrow().clone();
    assert_eq!(fmdm.version, 1);
    assert_eq!(fmdm.folders.len(), 1);
}

#[tokio::test]
async fn remove_then_status_update_is_a_silent_noop() {
    let (handle, _watch_rx) = spawn();
    handle.add_folder(Folder::new(PathBuf::from("/a/b"), "m1")).await;
    handle.remove_folder(PathBuf::from("/a/b")).await;
    handle
        .update_folder_status(PathBuf::from("/a/b"), FolderStatus::Indexing)
        .await;
    let snap = handle.snapshot().await.expect("snapshot");
    assert!(snap.folders.is_empty());
}

#[tokio::test]
async fn add_folder_replaces_existing_entry_for_same_path() {
    let (handle, _watch_rx) = spawn();
    handle.add_folder(Folder::new(PathBuf::from("/a/b"), "m1")).await;
    handle.add_folder(Folder::new(PathBuf::from("/a/b"), "m2")).await;
    let snap = handle.snapshot().await.expect("snapshot");
    assert_eq!(snap.folders.len(), 1);
    assert_eq!(snap.folders[0].model, "m2");
}

#[tokio::test]
async fn version_increments_monotonically() {
    let (handle, _watch_rx) = spawn();
    handle.add_folder(Folder::new(PathBuf::from("/a"), "m1")).await;
    let v1 = handle.snapshot().await.expect("snapshot").version;
    handle.add_folder(Folder::new(PathBuf::from("/b"), "m1")).await;
    let v2 = handle.snapshot().await.expect("snapshot").version;
    assert!(v2 > v1);
}
