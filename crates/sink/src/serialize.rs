// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Record rendering: one composite record per write call, as a JSON line
//! or a human-readable delimited text block.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde_json::Value;

/// The composite record written in one append: timestamp, involved
/// levels, and (in served mode) the request-context block. Insertion
/// order is the output order.
pub type Record = IndexMap<String, Value>;

/// Fields embedded in the served-mode delimiter line and therefore
/// dropped from the flattened body.
const DELIMITER_FIELDS: [&str; 5] = ["timestamp", "ip", "method", "host", "uri"];

/// Format a timestamp with the configured strftime string.
///
/// A malformed format string falls back to RFC 3339 instead of failing
/// the write.
pub fn format_timestamp(now: &DateTime<Utc>, format: &str) -> String {
    use std::fmt::Write as _;
    let mut out = String::new();
    if write!(out, "{}", now.format(format)).is_err() {
        return now.to_rfc3339();
    }
    out
}

/// One compact JSON object, newline-terminated. serde_json leaves UTF-8
/// and forward slashes unescaped, and empty values are retained.
pub fn json_line(record: &Record) -> String {
    let mut line = serde_json::to_string(record).unwrap_or_default();
    line.push('\n');
    line
}

/// Batch text rendering: `[<timestamp>]` prefix, remaining field values
/// joined with newlines.
pub fn text_batch(record: &Record) -> String {
    let timestamp = record
        .get("timestamp")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let body: Vec<String> = record
        .iter()
        .filter(|(key, _)| key.as_str() != "timestamp")
        .map(|(_, value)| render_scalar(value))
        .collect();
    format!("[{}]{}\n", timestamp, body.join("\n"))
}

/// Served text rendering: a generated delimiter line embedding the
/// request essentials, then every remaining field flattened to
/// `key:value` lines. Empty values are omitted entirely.
pub fn text_served(record: &Record) -> String {
    let get = |key: &str| {
        record
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
    };
    let mut lines = vec![format!(
        "---------------------------------  [{}] {} {} {} {}  ------------------------------",
        get("timestamp"),
        get("ip"),
        get("method"),
        get("host"),
        get("uri"),
    )];

    for (key, value) in record {
        if DELIMITER_FIELDS.contains(&key.as_str()) {
            continue;
        }
        flatten_into(&mut lines, Some(key.as_str()), value);
    }

    format!("\n{}\n", lines.join("\n"))
}

/// Recursively flatten a value into `key:value` lines. Composite values
/// contribute their own block inline; empty values contribute nothing.
fn flatten_into(lines: &mut Vec<String>, key: Option<&str>, value: &Value) {
    if is_empty(value) {
        return;
    }
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                flatten_into(lines, Some(k.as_str()), v);
            }
        }
        Value::Array(items) => {
            for item in items {
                flatten_into(lines, None, item);
            }
        }
        leaf => {
            let rendered = render_scalar(leaf);
            match key {
                Some(k) => lines.push(format!("{}:{}", k, rendered)),
                None => lines.push(rendered),
            }
        }
    }
}

/// Falsy check for text-mode omission: null, false, zero, empty or
/// `"0"` strings, and empty containers.
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(render_scalar)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "serialize_tests.rs"]
mod tests;
