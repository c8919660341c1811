// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn terminal_states() {
    assert!(DownloadStatus::Ready.is_terminal());
    assert!(DownloadStatus::Error.is_terminal());
    assert!(!DownloadStatus::Downloading.is_terminal());
    assert!(!DownloadStatus::Queued.is_terminal());
}
