// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Well-known log level names.
//!
//! Levels are open-ended strings: any name acts as a partition key for
//! buffering and filtering. The constants here cover the PSR-3 severities
//! plus the domain categories the aggregator exposes as convenience
//! methods.

pub const EMERGENCY: &str = "emergency";
pub const ALERT: &str = "alert";
pub const CRITICAL: &str = "critical";
pub const ERROR: &str = "error";
pub const WARNING: &str = "warning";
pub const NOTICE: &str = "notice";
pub const INFO: &str = "info";
pub const DEBUG: &str = "debug";

// Domain categories
pub const SQL: &str = "sql";
pub const LOGIN: &str = "login";
pub const OPERATION: &str = "operation";
