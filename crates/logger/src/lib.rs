// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! reqlog: request-scoped structured logging.
//!
//! One [`Logger`] is created per request or batch invocation. Served
//! requests buffer entries and flush them as a single unit via
//! [`Logger::save`]; batch runs write through immediately.

mod logger;

pub use logger::Logger;

pub use reqlog_core::{
    interpolate, level, merge_metadata, ApartLevels, Clock, Config, ContextProvider, ContextVars,
    EntryMap, ExecMode, FakeClock, Message, Metadata, NullContext, SingleFile, SinkKind,
    StaticContext, SystemClock, UnknownSinkKind,
};
pub use reqlog_sink::{FileSink, Sink};
