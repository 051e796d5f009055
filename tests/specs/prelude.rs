//! Test helpers for behavioral specifications.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::Path;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use indexmap::IndexMap;
use reqlog::{Config, ContextVars, ExecMode, FakeClock, Logger, Metadata, StaticContext};

/// All specs run at a pinned instant: 2026-08-05 09:30:00 UTC.
pub fn pinned_clock() -> Arc<FakeClock> {
    let ms = Utc
        .with_ymd_and_hms(2026, 8, 5, 9, 30, 0)
        .single()
        .unwrap()
        .timestamp_millis() as u64;
    Arc::new(FakeClock::at(ms))
}

/// A deterministic request context.
pub fn request_context() -> StaticContext {
    let mut headers = IndexMap::new();
    headers.insert("user-agent".to_string(), "curl/8.0".to_string());
    headers.insert("accept".to_string(), "*/*".to_string());
    StaticContext {
        ip: "10.0.0.7".to_string(),
        domain: "https://example.com".to_string(),
        host: "example.com".to_string(),
        method: "GET".to_string(),
        url: "/orders?id=9".to_string(),
        headers,
        params: Metadata::new(),
    }
}

/// Build a logger rooted at `root` in the given mode.
pub fn logger_at(root: &Path, config: Config, mode: ExecMode) -> Logger {
    let config = Config {
        path: Some(root.to_path_buf()),
        ..config
    };
    Logger::with_clock(config, Box::new(request_context()), mode, pinned_clock())
}

pub fn served_logger(root: &Path, config: Config) -> Logger {
    logger_at(root, config, ExecMode::Served)
}

pub fn batch_logger(root: &Path, config: Config) -> Logger {
    logger_at(root, config, ExecMode::Batch)
}

/// Context vars from string pairs.
pub fn vars(pairs: &[(&str, &str)]) -> ContextVars {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
        .collect()
}

/// Read a log file, failing with its path on error.
pub fn read(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}
