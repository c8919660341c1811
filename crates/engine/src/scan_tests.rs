// SPDX-License-Identifier: MIT

use super::*;

use crate::parse::PlainTextParser;
use tempfile::tempdir;

#[test]
fn scan_picks_up_supported_files_and_skips_unsupported() {
    let dir = tempdir().expect("tempdir");
    std::fs::write(dir.path().join("a.txt"), b"hello").expect("write");
    std::fs::write(dir.path().join("a.bin"), b"\x00\x01").expect("write");
    let current = scan_folder(dir.path(), &PlainTextParser, &[]).expect("scan");
    assert_eq!(current.len(), 1);
    assert!(current.keys().next().unwrap().ends_with("a.txt"));
}

#[test]
fn scan_skips_default_ignored_directories() {
    let dir = tempdir().expect("tempdir");
    let node_modules = dir.path().join("node_modules");
    std::fs::create_dir(&node_modules).expect("mkdir");
    std::fs::write(node_modules.join("dep.txt"), b"ignored").expect("write");
    std::fs::write(dir.path().join("kept.txt"), b"kept").expect("write");
    let current = scan_folder(dir.path(), &PlainTextParser, &[]).expect("scan");
    assert_eq!(current.len(), 1);
    assert!(current.keys().next().unwrap().ends_with("kept.txt"));
}

#[test]
fn reconcile_detects_new_changed_and_removed_files() {
    let mut stored = HashMap::new();
    stored.insert(PathBuf::from("/a"), Fingerprint::new(PathBuf::from("/a"), 5, "t0", b"hello"));
    stored.insert(PathBuf::from("/b"), Fingerprint::new(PathBuf::from("/b"), 5, "t0", b"world"));

    let mut current = HashMap::new();
    current.insert(PathBuf::from("/a"), Fingerprint::new(PathBuf::from("/a"), 5, "t0", b"hello"));
    current.insert(PathBuf::from("/c"), Fingerprint::new(PathBuf::from("/c"), 5, "t1", b"fresh"));

    let (to_index, to_delete) = reconcile(&current, &stored);
    assert_eq!(to_index, vec![PathBuf::from("/c")]);
    assert_eq!(to_delete, vec![PathBuf::from("/b")]);
}
