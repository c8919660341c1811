// SPDX-License-Identifier: MIT

//! Shared test fixtures for `fmcp-core` and downstream crates.
//!
//! Gated behind `cfg(test)` in-crate and the `test-support` feature for
//! consumers that want the same fixtures in their own test code.

use crate::clock::FakeClock;
use crate::fmdm::Fmdm;
use crate::folder::Folder;
use std::path::PathBuf;

/// A `Folder` with sensible defaults, for tests that don't care about the
/// exact path or model.
pub fn sample_folder(path: &str, model: &str) -> Folder {
    Folder::new(PathBuf::from(path), model)
}

/// An `Fmdm` seeded with the given folders at version 1.
pub fn sample_fmdm(folders: Vec<Folder>) -> Fmdm {
    Fmdm { version: 1, folders, ..Fmdm::default() }
}

/// A `FakeClock` fixed at a deterministic instant, useful whenever a test
/// needs a stable `created_at`/`mtime` without caring about the actual value.
pub fn fixed_clock() -> FakeClock {
    let clock = FakeClock::new();
    clock.set_epoch_ms(1_700_000_000_000);
    clock
}

#[cfg(test)]
#[path = "test_support_tests.rs"]
mod tests;
