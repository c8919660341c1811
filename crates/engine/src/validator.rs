// SPDX-License-Identifier: MIT

//! Folder Validator (C2): pure, side-effect-free arbitration of whether a
//! candidate path may be added to the monitored set. This is the only
//! component aware of the ancestor/sub-folder replacement policy — that
//! knowledge must not leak into the pipeline or the broadcast bus.

use fmcp_core::Folder;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub message: Option<String>,
    /// Folders that would be replaced if the caller confirms adding an
    /// ancestor of one or more already-monitored folders.
    pub replaces: Vec<PathBuf>,
}

impl ValidationResult {
    fn invalid(message: impl Into<String>) -> Self {
        Self { valid: false, message: Some(message.into()), replaces: Vec::new() }
    }

    fn valid() -> Self {
        Self { valid: true, message: None, replaces: Vec::new() }
    }

    fn valid_with_warning(message: impl Into<String>, replaces: Vec<PathBuf>) -> Self {
        Self { valid: true, message: Some(message.into()), replaces }
    }
}

/// Applies the rules in order, first match wins (§4.1). Canonicalization
/// happens once, uniformly, via `std::fs::canonicalize` — there is no
/// separate front-end copy of this logic anywhere in the workspace.
pub fn validate_folder(candidate: &Path, existing: &[Folder]) -> ValidationResult {
    let canonical = match std::fs::canonicalize(candidate) {
        Ok(path) if path.is_dir() => path,
        _ => return ValidationResult::invalid("path does not exist or is not a directory"),
    };

    for folder in existing {
        if folder.path == canonical {
            return ValidationResult::invalid(format!("already monitored with model {}", folder.model));
        }
    }

    for folder in existing {
        if canonical != folder.path && canonical.starts_with(&folder.path) {
            return ValidationResult::invalid(format!(
                "already covered by parent {}",
                folder.path.display()
            ));
        }
    }

    let replaces: Vec<PathBuf> = existing
        .iter()
        .filter(|folder| folder.path != canonical && folder.path.starts_with(&canonical))
        .map(|folder| folder.path.clone())
        .collect();

    if !replaces.is_empty() {
        let list = replaces.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ");
        return ValidationResult::valid_with_warning(
            format!("will replace {} existing folder(s): {list}", replaces.len()),
            replaces,
        );
    }

    ValidationResult::valid()
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
