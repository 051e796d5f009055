// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Destination path resolution for log files.
//!
//! Pure functions of configuration, timestamp, and execution mode:
//!   single-file mode:        `<root>/<name>.log`
//!   with a file-count limit: `<root>/YYYYMMDD[_cli].log`
//!   otherwise:               `<root>/YYYYMM/DD[_cli].log`
//!
//! Apart (per-level) files follow the same branching with `_<level>`
//! appended to the name component, and always sit flat in the master
//! file's parent directory.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use reqlog_core::{Config, ExecMode};

/// Resolve the main log file path for `now`.
pub fn master_log_path(config: &Config, root: &Path, now: DateTime<Utc>, mode: ExecMode) -> PathBuf {
    if let Some(name) = config.single.file_name() {
        return root.join(format!("{name}.log"));
    }

    let cli = cli_suffix(mode);
    if config.max_files > 0 {
        root.join(format!("{}{}.log", now.format("%Y%m%d"), cli))
    } else {
        root.join(now.format("%Y%m").to_string())
            .join(format!("{}{}.log", now.format("%d"), cli))
    }
}

/// Resolve the apart file path for `level`, flat under `dir` (the master
/// path's parent directory).
pub fn apart_log_path(
    config: &Config,
    dir: &Path,
    level: &str,
    now: DateTime<Utc>,
    mode: ExecMode,
) -> PathBuf {
    let name = if let Some(name) = config.single.file_name() {
        format!("{name}_{level}")
    } else if config.max_files > 0 {
        format!("{}_{}{}", now.format("%Y%m%d"), level, cli_suffix(mode))
    } else {
        format!("{}_{}{}", now.format("%d"), level, cli_suffix(mode))
    };

    dir.join(format!("{name}.log"))
}

/// Batch invocations get their own files.
fn cli_suffix(mode: ExecMode) -> &'static str {
    if mode.is_batch() {
        "_cli"
    } else {
        ""
    }
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
