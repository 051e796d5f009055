// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File-backed sink: date-bucketed, single-file, or per-level apart
//! destinations with size rotation and count pruning.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde_json::Value;
use uuid::Uuid;

use reqlog_core::{
    Clock, Config, ContextProvider, EntryMap, ExecMode, Message, Metadata, SystemClock,
};

use crate::serialize::{self, Record};
use crate::sink::Sink;
use crate::{paths, rotate};

/// Display lines per level, ready for serialization.
type RenderedLevels = IndexMap<String, Vec<String>>;

/// Sink that appends composite records to log files.
///
/// Each save opens, appends, and closes the destination files; parent
/// directories are created on demand. Concurrent writers from other
/// requests interleave records but rely on platform append semantics to
/// keep single records intact.
pub struct FileSink {
    config: Config,
    root: PathBuf,
    context: Box<dyn ContextProvider>,
    mode: ExecMode,
    clock: Arc<dyn Clock>,
}

impl FileSink {
    pub fn new(config: Config, context: Box<dyn ContextProvider>, mode: ExecMode) -> Self {
        Self::with_clock(config, context, mode, Arc::new(SystemClock))
    }

    /// Construct with an explicit time source.
    pub fn with_clock(
        config: Config,
        context: Box<dyn ContextProvider>,
        mode: ExecMode,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let root = config.root();
        Self {
            config,
            root,
            context,
            mode,
            clock,
        }
    }

    /// The storage root this sink writes under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn display_line(&self, level: &str, message: &Message) -> String {
        if self.config.json {
            message.render()
        } else {
            format!("[ {} ] {}", level, message.render())
        }
    }

    fn write_rendered(&self, rendered: &RenderedLevels, dest: &Path, custom: &Metadata) -> bool {
        if let Err(e) = self.append_record(rendered, dest, custom) {
            tracing::warn!(
                path = %dest.display(),
                error = %e,
                "failed to append log record"
            );
            return false;
        }
        true
    }

    fn append_record(
        &self,
        rendered: &RenderedLevels,
        dest: &Path,
        custom: &Metadata,
    ) -> io::Result<()> {
        rotate::rotate_if_oversized(dest, self.config.file_size, self.clock.epoch_secs());

        let now = datetime(self.clock.epoch_ms());
        let timestamp = serialize::format_timestamp(&now, &self.config.time_format);

        let mut record = Record::new();
        record.insert("timestamp".to_string(), Value::String(timestamp.clone()));
        record.insert(
            "log_type".to_string(),
            Value::Array(rendered.keys().map(|k| Value::String(k.clone())).collect()),
        );
        for (level, lines) in rendered {
            record.insert(level.clone(), Value::String(lines.join("\n")));
        }

        let record = match self.mode {
            ExecMode::Batch => record,
            ExecMode::Served => self.enriched(record, custom, timestamp),
        };

        let payload = if self.config.json {
            serialize::json_line(&record)
        } else if self.mode.is_batch() {
            serialize::text_batch(&record)
        } else {
            serialize::text_served(&record)
        };

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new().create(true).append(true).open(dest)?;
        file.write_all(payload.as_bytes())
    }

    /// Prepend the request-context block and custom metadata to a log
    /// record. Request-context fields win on key collision, custom
    /// metadata second, log fields last.
    fn enriched(&self, log: Record, custom: &Metadata, timestamp: String) -> Record {
        let ctx = &self.context;
        let mut record = Record::new();
        record.insert("timestamp".to_string(), Value::String(timestamp));
        record.insert("app_guid".to_string(), Value::String(self.request_id()));
        record.insert(
            "app_name".to_string(),
            Value::String(self.config.app_name.clone()),
        );
        record.insert("ip".to_string(), Value::String(ctx.ip()));
        record.insert("domain".to_string(), Value::String(ctx.domain()));
        record.insert("host".to_string(), Value::String(ctx.host()));
        record.insert("method".to_string(), Value::String(ctx.method()));
        record.insert("uri".to_string(), Value::String(ctx.url()));
        record.insert(
            "user_agent".to_string(),
            Value::String(ctx.header("user-agent").unwrap_or_default()),
        );
        record.insert(
            "request".to_string(),
            Value::Object(ctx.request_params().into_iter().collect()),
        );
        record.insert(
            "header".to_string(),
            Value::Object(
                ctx.headers()
                    .into_iter()
                    .map(|(k, v)| (k, Value::String(v)))
                    .collect(),
            ),
        );

        for (key, value) in custom {
            if !record.contains_key(key) {
                record.insert(key.clone(), value.clone());
            }
        }
        for (key, value) in log {
            if !record.contains_key(&key) {
                record.insert(key, value);
            }
        }
        record
    }

    /// The configured request id, or a generated one.
    fn request_id(&self) -> String {
        if self.config.app_guid.is_empty() {
            Uuid::new_v4().to_string()
        } else {
            self.config.app_guid.clone()
        }
    }
}

impl Sink for FileSink {
    /// Split apart levels into their own files, write the remainder to
    /// the main file. Every write is attempted even after a failure;
    /// the result is the conjunction of all of them.
    fn save(&self, entries: &EntryMap, custom: &Metadata) -> bool {
        // Prune before today's file name is computed, so a brand-new
        // file never counts against the ceiling it is about to join.
        rotate::prune_old_logs(&self.root, self.config.max_files);

        let now = datetime(self.clock.epoch_ms());
        let master = paths::master_log_path(&self.config, &self.root, now, self.mode);
        let apart_dir = master
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone());

        let mut main = RenderedLevels::new();
        let mut ok = true;
        for (level, messages) in entries {
            let rendered: Vec<String> = messages
                .iter()
                .map(|message| self.display_line(level, message))
                .collect();

            if self.config.apart_level.contains(level) {
                let dest = paths::apart_log_path(&self.config, &apart_dir, level, now, self.mode);
                let mut block = RenderedLevels::new();
                block.insert(level.clone(), rendered);
                ok &= self.write_rendered(&block, &dest, custom);
            } else {
                main.insert(level.clone(), rendered);
            }
        }

        if !main.is_empty() {
            ok &= self.write_rendered(&main, &master, custom);
        }
        ok
    }
}

fn datetime(epoch_ms: u64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(epoch_ms as i64).unwrap_or_default()
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
