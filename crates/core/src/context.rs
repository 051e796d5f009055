// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution mode and the request context contract.
//!
//! The aggregator and sinks never query ambient process state; whether the
//! current invocation is a served request or a batch run is passed in as an
//! explicit [`ExecMode`], and request details come from a read-only
//! [`ContextProvider`].

use indexmap::IndexMap;

use crate::entry::Metadata;

/// How the current process was entered.
///
/// Batch runs have no natural end-of-request flush point, so the
/// aggregator writes immediately instead of buffering, and file names
/// carry a `_cli` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecMode {
    /// A served request with an explicit flush point.
    Served,
    /// A one-shot command-style invocation.
    Batch,
}

impl ExecMode {
    pub fn is_batch(self) -> bool {
        matches!(self, ExecMode::Batch)
    }
}

/// Read-only view of the request being served.
///
/// Consumed by sinks to enrich flushed output. Never invoked in
/// [`ExecMode::Batch`].
pub trait ContextProvider: Send {
    /// Client IP address.
    fn ip(&self) -> String;
    /// Request domain, including scheme/port where known.
    fn domain(&self) -> String;
    /// Host name.
    fn host(&self) -> String;
    /// HTTP method.
    fn method(&self) -> String;
    /// Requested URI.
    fn url(&self) -> String;
    /// Single header lookup, case-insensitive.
    fn header(&self, name: &str) -> Option<String>;
    /// The full header set.
    fn headers(&self) -> IndexMap<String, String>;
    /// Raw request parameters.
    fn request_params(&self) -> Metadata;
}

/// Context for batch invocations. Every accessor is empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullContext;

impl ContextProvider for NullContext {
    fn ip(&self) -> String {
        String::new()
    }

    fn domain(&self) -> String {
        String::new()
    }

    fn host(&self) -> String {
        String::new()
    }

    fn method(&self) -> String {
        String::new()
    }

    fn url(&self) -> String {
        String::new()
    }

    fn header(&self, _name: &str) -> Option<String> {
        None
    }

    fn headers(&self) -> IndexMap<String, String> {
        IndexMap::new()
    }

    fn request_params(&self) -> Metadata {
        Metadata::new()
    }
}

/// Value-backed provider captured once at request start.
///
/// Useful when the host framework hands over plain values rather than a
/// live request object, and as a deterministic provider in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticContext {
    pub ip: String,
    pub domain: String,
    pub host: String,
    pub method: String,
    pub url: String,
    pub headers: IndexMap<String, String>,
    pub params: Metadata,
}

impl ContextProvider for StaticContext {
    fn ip(&self) -> String {
        self.ip.clone()
    }

    fn domain(&self) -> String {
        self.domain.clone()
    }

    fn host(&self) -> String {
        self.host.clone()
    }

    fn method(&self) -> String {
        self.method.clone()
    }

    fn url(&self) -> String {
        self.url.clone()
    }

    fn header(&self, name: &str) -> Option<String> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
    }

    fn headers(&self) -> IndexMap<String, String> {
        self.headers.clone()
    }

    fn request_params(&self) -> Metadata {
        self.params.clone()
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
