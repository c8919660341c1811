// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn progress_rounds_to_nearest_integer() {
    let mut f = Folder::new(PathBuf::from("/tmp/x"), "m1");
    f.set_status(FolderStatus::Indexing);
    f.set_progress(1, 3);
    assert_eq!(f.progress, 33);
    f.set_progress(2, 3);
    assert_eq!(f.progress, 67);
    f.set_progress(3, 3);
    assert_eq!(f.progress, 100);
}

#[test]
fn progress_resets_outside_scanning_or_indexing() {
    let mut f = Folder::new(PathBuf::from("/tmp/x"), "m1");
    f.set_status(FolderStatus::Indexing);
    f.set_progress(1, 2);
    assert_eq!(f.progress, 50);
    f.set_status(FolderStatus::Ready);
    assert_eq!(f.progress, 0);
}

#[test]
fn set_error_clears_progress_and_sets_status() {
    let mut f = Folder::new(PathBuf::from("/tmp/x"), "m1");
    f.set_status(FolderStatus::Indexing);
    f.set_progress(1, 2);
    f.set_error("backend died");
    assert_eq!(f.status, FolderStatus::Error);
    assert_eq!(f.error.as_deref(), Some("backend died"));
    assert_eq!(f.progress, 0);
}

#[test]
fn status_queryability() {
    assert!(FolderStatus::Ready.is_queryable());
    assert!(FolderStatus::Watching.is_queryable());
    assert!(!FolderStatus::Indexing.is_queryable());
    assert!(!FolderStatus::Error.is_queryable());
}
