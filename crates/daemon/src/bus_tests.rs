// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn diff_reports_start_for_a_brand_new_download() {
    let current = vec![ModelDownload { model_id: "m1".into(), status: fmcp_core::DownloadStatus::Queued, progress: 0, eta_seconds: None, error: None }];
    let events = diff_download_events(&[], &current);
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], ServerMessage::ModelDownload { event: ModelDownloadEvent::Start, .. }));
}

#[test]
fn diff_reports_complete_on_transition_to_ready() {
    let previous = vec![ModelDownload { model_id: "m1".into(), status: fmcp_core::DownloadStatus::Downloading, progress: 80, eta_seconds: None, error: None }];
    let current = vec![ModelDownload { model_id: "m1".into(), status: fmcp_core::DownloadStatus::Ready, progress: 100, eta_seconds: None, error: None }];
    let events = diff_download_events(&previous, &current);
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], ServerMessage::ModelDownload { event: ModelDownloadEvent::Complete, .. }));
}

#[test]
fn diff_reports_nothing_when_unchanged() {
    let snapshot = vec![ModelDownload { model_id: "m1".into(), status: fmcp_core::DownloadStatus::Downloading, progress: 50, eta_seconds: None, error: None }];
    assert!(diff_download_events(&snapshot, &snapshot).is_empty());
}

#[test]
fn extract_id_reads_the_id_field_from_unparseable_messages() {
    assert_eq!(extract_id(r#"{"type":"folder.teleport","id":"abc"}"#), "abc");
    assert_eq!(extract_id("not json"), "");
}
