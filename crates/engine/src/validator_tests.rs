// SPDX-License-Identifier: MIT

use super::*;

use tempfile::tempdir;

#[test]
fn rejects_nonexistent_path() {
    let result = validate_folder(Path::new("/does/not/exist/anywhere"), &[]);
    assert!(!result.valid);
    assert_eq!(result.message.as_deref(), Some("path does not exist or is not a directory"));
}

#[test]
fn rejects_file_path() {
    let dir = tempdir().expect("tempdir");
    let file = dir.path().join("f.txt");
    std::fs::write(&file, b"x").expect("write");
    let result = validate_folder(&file, &[]);
    assert!(!result.valid);
}

#[test]
fn rejects_already_monitored_path() {
    let dir = tempdir().expect("tempdir");
    let canonical = std::fs::canonicalize(dir.path()).expect("canonicalize");
    let existing = vec![Folder::new(canonical, "m1")];
    let result = validate_folder(dir.path(), &existing);
    assert!(!result.valid);
    assert!(result.message.unwrap().contains("already monitored"));
}

#[test]
fn rejects_descendant_of_existing_folder() {
    let dir = tempdir().expect("tempdir");
    let child = dir.path().join("child");
    std::fs::create_dir(&child).expect("mkdir");
    let canonical_parent = std::fs::canonicalize(dir.path()).expect("canonicalize");
    let existing = vec![Folder::new(canonical_parent, "m1")];
    let result = validate_folder(&child, &existing);
    assert!(!result.valid);
    assert!(result.message.unwrap().contains("already covered by parent"));
}

#[test]
fn accepts_ancestor_with_replacement_warning() {
    let dir = tempdir().expect("tempdir");
    let child = dir.path().join("child");
    std::fs::create_dir(&child).expect("mkdir");
    let canonical_child = std::fs::canonicalize(&child).expect("canonicalize");
    let existing = vec![Folder::new(canonical_child.clone(), "m1")];
    let result = validate_folder(dir.path(), &existing);
    assert!(result.valid);
    assert_eq!(result.replaces, vec![canonical_child]);
    assert!(result.message.is_some());
}

#[test]
fn accepts_unrelated_path_with_no_message() {
    let dir_a = tempdir().expect("tempdir");
    let dir_b = tempdir().expect("tempdir");
    let canonical_a = std::fs::canonicalize(dir_a.path()).expect("canonicalize");
    let existing = vec![Folder::new(canonical_a, "m1")];
    let result = validate_folder(dir_b.path(), &existing);
    assert!(result.valid);
    assert!(result.message.is_none());
    assert!(result.replaces.is_empty());
}
