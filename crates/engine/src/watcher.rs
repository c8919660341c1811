// SPDX-License-Identifier: MIT

//! File Watcher (C6): debounced, coalesced filesystem events for a folder
//! root. Built on `notify` + `notify-debouncer-full` rather than hand-rolled
//! polling — the debouncer already merges rapid create/modify/remove bursts
//! per path within its window, which is exactly the coalescing this
//! component is contracted to provide.

use async_trait::async_trait;
use notify::{EventKind, RecursiveMode};
use notify_debouncer_full::{new_debouncer, DebounceEventResult, DebouncedEvent, Debouncer, FileIdMap};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Modified,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEvent {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

/// Produces a stream of coalesced filesystem events. The default debounce
/// window is ~1s (§4.5); rename is treated as delete-then-create within the
/// same window (Open Question (b), see DESIGN.md).
#[async_trait]
pub trait FileWatcher: Send {
    async fn next(&mut self) -> Option<FileEvent>;
}

pub struct NotifyWatcher {
    // Kept alive for the watcher's lifetime; dropping it stops the
    // background watch thread.
    _debouncer: Debouncer<notify::RecommendedWatcher, FileIdMap>,
    events: mpsc::UnboundedReceiver<FileEvent>,
}

impl NotifyWatcher {
    pub fn new(root: &Path, debounce_window: Duration) -> notify::Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut debouncer = new_debouncer(debounce_window, None, move |result: DebounceEventResult| match result {
            Ok(events) => {
                for event in &events {
                    for file_event in to_file_events(event) {
                        let _ = tx.send(file_event);
                    }
                }
            }
            Err(errors) => {
                for err in errors {
                    warn!(%err, "file watcher error, continuing");
                }
            }
        })?;
        debouncer.watch(root, RecursiveMode::Recursive)?;
        Ok(Self { _debouncer: debouncer, events: rx })
    }
}

#[async_trait]
impl FileWatcher for NotifyWatcher {
    async fn next(&mut self) -> Option<FileEvent> {
        self.events.recv().await
    }
}

fn to_file_events(event: &DebouncedEvent) -> Vec<FileEvent> {
    match event.kind {
        EventKind::Create(_) => {
            event.paths.iter().map(|p| FileEvent { path: p.clone(), kind: ChangeKind::Created }).collect()
        }
        EventKind::Modify(notify::event::ModifyKind::Name(_)) => match event.paths.as_slice() {
            [from, to] => vec![
                FileEvent { path: from.clone(), kind: ChangeKind::Deleted },
                FileEvent { path: to.clone(), kind: ChangeKind::Created },
            ],
            [single] => vec![FileEvent { path: single.clone(), kind: ChangeKind::Modified }],
            _ => Vec::new(),
        },
        EventKind::Modify(_) => {
            event.paths.iter().map(|p| FileEvent { path: p.clone(), kind: ChangeKind::Modified }).collect()
        }
        EventKind::Remove(_) => {
            event.paths.iter().map(|p| FileEvent { path: p.clone(), kind: ChangeKind::Deleted }).collect()
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;
