// SPDX-License-Identifier: MIT

use super::*;

use tempfile::tempdir;

#[test]
fn missing_file_reads_as_none() {
    let dir = tempdir().expect("tempdir");
    assert_eq!(DiscoveryFile::read(dir.path()).expect("read"), None);
}

#[test]
fn round_trips_through_write_and_read() {
    let dir = tempdir().expect("tempdir");
    let discovery = DiscoveryFile {
        pid: 1234,
        ws_url: "ws://127.0.0.1:54321".to_string(),
        version: "0.1.0".to_string(),
        started_at: "2026-07-28T00:00:00+00:00".to_string(),
    };
    discovery.write(dir.path()).expect("write");
    let loaded = DiscoveryFile::read(dir.path()).expect("read").expect("present");
    assert_eq!(loaded, discovery);
}

#[test]
fn remove_deletes_the_file() {
    let dir = tempdir().expect("tempdir");
    let discovery =
        DiscoveryFile { pid: 1, ws_url: "ws://x".to_string(), version: "0.1.0".to_string(), started_at: "t".to_string() };
    discovery.write(dir.path()).expect("write");
    DiscoveryFile::remove(dir.path());
    assert_eq!(DiscoveryFile::read(dir.path()).expect("read"), None);
}
