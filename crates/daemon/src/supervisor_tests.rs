// SPDX-License-Identifier: MIT

use super::*;

use tempfile::tempdir;

#[test]
fn acquire_rejects_a_second_concurrent_lock() {
    let dir = tempdir().expect("tempdir");
    let first = Supervisor::acquire(dir.path().to_path_buf()).expect("first lock");
    let second = Supervisor::acquire(dir.path().to_path_buf());
    assert!(second.is_err());
    drop(first);
}

#[test]
fn acquire_succeeds_again_after_the_first_is_dropped() {
    let dir = tempdir().expect("tempdir");
    let first = Supervisor::acquire(dir.path().to_path_buf()).expect("first lock");
    drop(first);
    let second = Supervisor::acquire(dir.path().to_path_buf());
    assert!(second.is_ok());
}

#[test]
fn acquire_creates_the_state_dir_if_missing() {
    let dir = tempdir().expect("tempdir");
    let nested = dir.path().join("nested").join("state");
    let supervisor = Supervisor::acquire(nested.clone()).expect("acquire");
    assert!(nested.is_dir());
    drop(supervisor);
}
