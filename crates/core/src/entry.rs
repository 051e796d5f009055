// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Buffered log messages and the per-request entry buffer.

use indexmap::IndexMap;
use serde_json::Value;

/// A single log message, already interpolated.
///
/// Structured payloads are first-class: recording a [`serde_json::Value`]
/// never fails, it is rendered as compact JSON when a display string is
/// needed.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Text(String),
    Data(Value),
}

impl Message {
    /// Display rendering: text as-is, structured data as compact JSON.
    pub fn render(&self) -> String {
        match self {
            Message::Text(s) => s.clone(),
            Message::Data(v) => v.to_string(),
        }
    }

    /// Borrow the text content, if this is a text message.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Message::Text(s) => Some(s),
            Message::Data(_) => None,
        }
    }
}

impl From<&str> for Message {
    fn from(s: &str) -> Self {
        Message::Text(s.to_string())
    }
}

impl From<String> for Message {
    fn from(s: String) -> Self {
        Message::Text(s)
    }
}

impl From<Value> for Message {
    fn from(v: Value) -> Self {
        Message::Data(v)
    }
}

/// Level → ordered list of messages.
///
/// Insertion order is preserved both across levels and within a level,
/// so a flushed batch replays entries in the order they were recorded.
pub type EntryMap = IndexMap<String, Vec<Message>>;

/// Caller-supplied key/value pairs attached to flushed output.
pub type Metadata = IndexMap<String, Value>;

/// Merge `from` into `into`, last write wins on key collision.
pub fn merge_metadata(into: &mut Metadata, from: Metadata) {
    for (key, value) in from {
        into.insert(key, value);
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
