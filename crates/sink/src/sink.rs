// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Storage backend contract and construction.

use std::sync::Arc;

use reqlog_core::{Clock, Config, ContextProvider, EntryMap, ExecMode, Metadata, SinkKind};

use crate::file::FileSink;

/// Storage backend for flushed log batches.
pub trait Sink: Send {
    /// Persist one batch of level-keyed entries together with the
    /// request's custom metadata.
    ///
    /// Returns true iff every attempted write succeeded. Failures must
    /// not panic; the caller decides whether to retry the batch.
    fn save(&self, entries: &EntryMap, custom: &Metadata) -> bool;
}

/// Build the sink selected by `config.kind`.
///
/// The backend set is closed: each [`SinkKind`] variant maps to exactly
/// one constructor arm. Unknown backend names never reach this point,
/// they fail when the configuration is parsed.
pub fn from_config(
    config: &Config,
    context: Box<dyn ContextProvider>,
    mode: ExecMode,
    clock: Arc<dyn Clock>,
) -> Box<dyn Sink> {
    match config.kind {
        SinkKind::File => Box::new(FileSink::with_clock(config.clone(), context, mode, clock)),
    }
}
