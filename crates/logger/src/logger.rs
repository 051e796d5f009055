// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The request-scoped log aggregator.

use std::sync::Arc;

use reqlog_core::{
    interpolate, level, merge_metadata, Clock, Config, ContextProvider, ContextVars, EntryMap,
    ExecMode, Message, Metadata, SystemClock,
};
use reqlog_sink::{from_config, Sink};

/// Accumulates log entries for the lifetime of one request or batch
/// invocation and flushes them to a sink as a single unit.
///
/// Served requests buffer entries until [`save`](Logger::save); batch
/// runs have no natural end-of-request flush point, so entries are
/// written through immediately.
///
/// Not shared across requests: the API is `&mut self` and each request
/// owns its own instance.
pub struct Logger {
    config: Config,
    sink: Box<dyn Sink>,
    mode: ExecMode,
    buffer: EntryMap,
    custom: Metadata,
    auth_key: Option<String>,
    writable: bool,
}

impl Logger {
    /// Construct with the sink selected by `config.kind`.
    pub fn new(config: Config, context: Box<dyn ContextProvider>, mode: ExecMode) -> Self {
        Self::with_clock(config, context, mode, Arc::new(SystemClock))
    }

    /// Construct with an explicit time source for the sink.
    pub fn with_clock(
        config: Config,
        context: Box<dyn ContextProvider>,
        mode: ExecMode,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let sink = from_config(&config, context, mode, clock);
        Self::with_sink(config, sink, mode)
    }

    /// Construct around any [`Sink`] implementation.
    pub fn with_sink(config: Config, sink: Box<dyn Sink>, mode: ExecMode) -> Self {
        let writable = !config.close;
        Self {
            config,
            sink,
            mode,
            buffer: EntryMap::new(),
            custom: Metadata::new(),
            auth_key: None,
            writable,
        }
    }

    /// Record a log entry.
    ///
    /// In served mode the entry is appended to the buffer; in batch
    /// mode it is written through immediately. No-op once the logger is
    /// closed.
    pub fn record(&mut self, message: impl Into<Message>, level: &str) {
        self.record_with(message, level, Metadata::new(), &ContextVars::new());
    }

    /// [`record`](Logger::record) with custom metadata and `{key}`
    /// context substitution.
    pub fn record_with(
        &mut self,
        message: impl Into<Message>,
        level: &str,
        custom: Metadata,
        vars: &ContextVars,
    ) {
        if !self.writable {
            return;
        }

        let message = match message.into() {
            Message::Text(text) if !vars.is_empty() => Message::Text(interpolate(&text, vars)),
            other => other,
        };
        if !custom.is_empty() {
            merge_metadata(&mut self.custom, custom);
        }

        match self.mode {
            ExecMode::Batch => {
                self.write(message, level, true);
            }
            ExecMode::Served => {
                self.buffer
                    .entry(level.to_string())
                    .or_default()
                    .push(message);
            }
        }
    }

    /// Record at an arbitrary level.
    pub fn log(&mut self, level: &str, message: impl Into<Message>) {
        self.record(message, level);
    }

    /// [`log`](Logger::log) with custom metadata and context
    /// substitution.
    pub fn log_with(
        &mut self,
        level: &str,
        message: impl Into<Message>,
        custom: Metadata,
        vars: &ContextVars,
    ) {
        self.record_with(message, level, custom, vars);
    }

    /// System is unusable.
    pub fn emergency(&mut self, message: impl Into<Message>) {
        self.record(message, level::EMERGENCY);
    }

    /// Action must be taken immediately.
    pub fn alert(&mut self, message: impl Into<Message>) {
        self.record(message, level::ALERT);
    }

    pub fn critical(&mut self, message: impl Into<Message>) {
        self.record(message, level::CRITICAL);
    }

    pub fn error(&mut self, message: impl Into<Message>) {
        self.record(message, level::ERROR);
    }

    pub fn warning(&mut self, message: impl Into<Message>) {
        self.record(message, level::WARNING);
    }

    pub fn notice(&mut self, message: impl Into<Message>) {
        self.record(message, level::NOTICE);
    }

    pub fn info(&mut self, message: impl Into<Message>) {
        self.record(message, level::INFO);
    }

    pub fn debug(&mut self, message: impl Into<Message>) {
        self.record(message, level::DEBUG);
    }

    /// Database statement trace.
    pub fn sql(&mut self, message: impl Into<Message>) {
        self.record(message, level::SQL);
    }

    /// Authentication event.
    pub fn login(&mut self, message: impl Into<Message>) {
        self.record(message, level::LOGIN);
    }

    /// Business operation audit entry.
    pub fn operation(&mut self, message: impl Into<Message>) {
        self.record(message, level::OPERATION);
    }

    /// Store the authorization key checked by [`check`](Logger::check).
    pub fn key(&mut self, auth_key: impl Into<String>) {
        self.auth_key = Some(auth_key.into());
    }

    /// Whether this logger is authorized to write under `config`.
    ///
    /// Only fails when a key is set, the config lists allowed keys, and
    /// the key is not among them. Absence of either side means allowed.
    pub fn check(&self, config: &Config) -> bool {
        match &self.auth_key {
            Some(auth_key) if !config.allow_key.is_empty() => {
                config.allow_key.iter().any(|k| k == auth_key)
            }
            _ => true,
        }
    }

    /// Flush the buffer to the sink as one unit.
    ///
    /// An empty buffer or a closed logger trivially succeeds with no
    /// I/O. An authorization rejection returns false and leaves the
    /// buffer untouched. Otherwise the buffer is projected through the
    /// level allow-list and handed to the sink; on success the buffer
    /// and custom metadata are cleared, on failure both are retained so
    /// the caller may retry.
    pub fn save(&mut self) -> bool {
        if self.buffer.is_empty() || !self.writable {
            return true;
        }
        if !self.check(&self.config) {
            tracing::debug!("log save rejected by authorization key");
            return false;
        }

        let projected: EntryMap = if self.config.level.is_empty() {
            self.buffer.clone()
        } else {
            self.config
                .level
                .iter()
                .filter_map(|lvl| {
                    self.buffer
                        .get(lvl)
                        .map(|messages| (lvl.clone(), messages.clone()))
                })
                .collect()
        };

        let saved = self.sink.save(&projected, &self.custom);
        if saved {
            self.buffer.clear();
            self.custom.clear();
        }
        saved
    }

    /// Write one entry through to the sink immediately.
    ///
    /// With no allow-list configured every write is treated as forced;
    /// otherwise the entry must be forced or its level allowed. Returns
    /// false without touching the sink when the entry is filtered out
    /// or the logger is closed.
    pub fn write(&mut self, message: impl Into<Message>, level: &str, force: bool) -> bool {
        if !self.writable {
            return false;
        }
        if !force && !self.config.level_enabled(level) {
            return false;
        }

        let mut entries = EntryMap::new();
        entries.insert(level.to_string(), vec![message.into()]);
        self.sink.save(&entries, &self.custom)
    }

    /// Disable writing for the rest of this logger's lifetime and
    /// discard the buffer. Terminal: nothing re-enables writing.
    pub fn close(&mut self) {
        self.writable = false;
        self.buffer.clear();
        self.custom.clear();
    }

    /// Discard the buffer without disabling future writes.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.custom.clear();
    }

    /// The buffered entries, by level in insertion order.
    pub fn entries(&self) -> &EntryMap {
        &self.buffer
    }

    /// The buffered entries for one level.
    pub fn entries_for(&self, level: &str) -> Option<&[Message]> {
        self.buffer.get(level).map(Vec::as_slice)
    }

    /// The custom metadata accumulated so far.
    pub fn metadata(&self) -> &Metadata {
        &self.custom
    }
}

#[cfg(test)]
#[path = "logger_tests.rs"]
mod tests;
