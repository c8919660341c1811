// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn missing_file_loads_as_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = PersistedConfig::load(&dir.path().join("nope.toml")).expect("load");
    assert!(cfg.folders.is_empty());
}

#[test]
fn round_trips_folders() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    let mut cfg = PersistedConfig::default();
    cfg.add_folder(FolderConfig { path: PathBuf::from("/a/b"), model: "m1".into() });
    cfg.save(&path).expect("save");

    let reloaded = PersistedConfig::load(&path).expect("load");
    assert_eq!(reloaded.folders, cfg.folders);
}

#[test]
fn unknown_top_level_keys_survive_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "futureField = \"kept\"\n\n[[folders]]\npath = \"/a\"\nmodel = \"m1\"\n")
        .expect("seed file");

    let mut cfg = PersistedConfig::load(&path).expect("load");
    cfg.remove_folder(Path::new("/nonexistent"));
    cfg.save(&path).expect("save");

    let rendered = std::fs::read_to_string(&path).expect("read back");
    assert!(rendered.contains("futureField"));
    assert!(rendered.contains("kept"));
}

#[test]
fn add_folder_replaces_existing_entry_for_same_path() {
    let mut cfg = PersistedConfig::default();
    cfg.add_folder(FolderConfig { path: PathBuf::from("/a"), model: "m1".into() });
    cfg.add_folder(FolderConfig { path: PathBuf::from("/a"), model: "m2".into() });
    assert_eq!(cfg.folders.len(), 1);
    assert_eq!(cfg.folders[0].model, "m2");
}
