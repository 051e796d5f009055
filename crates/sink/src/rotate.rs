// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Size-based rotation and count-based pruning of log files.
//!
//! Both operations are best-effort: failures are logged via tracing and
//! never block the write that follows. Rotation is advisory under
//! concurrency; when two writers race, at most one rename succeeds and
//! the loser appends to whichever file exists.

use std::fs;
use std::path::{Path, PathBuf};

/// Rename `path` to `<dir>/<unixtime>-<basename>` once it has reached
/// `threshold` bytes, so the next write starts a fresh file.
pub fn rotate_if_oversized(path: &Path, threshold: u64, epoch_secs: u64) {
    let Ok(meta) = fs::metadata(path) else {
        return;
    };
    if !meta.is_file() || meta.len() < threshold {
        return;
    }

    let backup = backup_path(path, epoch_secs);
    if let Err(e) = fs::rename(path, &backup) {
        tracing::warn!(
            path = %path.display(),
            error = %e,
            "failed to rotate oversized log file"
        );
    }
}

fn backup_path(path: &Path, epoch_secs: u64) -> PathBuf {
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    let base = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    dir.join(format!("{}-{}", epoch_secs, base))
}

/// Delete the oldest `*.log` file at `root` when the count exceeds
/// `max_files`. Oldest means the lexicographically smallest file name,
/// which is chronological for the date-stamped names the resolver
/// produces.
pub fn prune_old_logs(root: &Path, max_files: usize) {
    if max_files == 0 {
        return;
    }
    let Ok(dir) = fs::read_dir(root) else {
        return;
    };

    let mut logs: Vec<PathBuf> = dir
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "log"))
        .collect();
    if logs.len() <= max_files {
        return;
    }

    logs.sort();
    if let Some(oldest) = logs.first() {
        if let Err(e) = fs::remove_file(oldest) {
            tracing::warn!(
                path = %oldest.display(),
                error = %e,
                "failed to prune old log file"
            );
        }
    }
}

#[cfg(test)]
#[path = "rotate_tests.rs"]
mod tests;
