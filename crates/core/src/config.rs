// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logger configuration surface.
//!
//! Immutable after construction. All options have defaults, so a config
//! can be deserialized from a partial TOML table or built with
//! `Config { json: true, ..Config::default() }`.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// Default log file size threshold before rotation: 2 MiB.
pub const DEFAULT_FILE_SIZE: u64 = 2 * 1024 * 1024;

/// Default record timestamp format (strftime).
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// A sink name that does not match any known backend.
#[derive(Debug, Error)]
#[error("unknown sink kind: {0}")]
pub struct UnknownSinkKind(pub String);

/// Storage backend selector. A closed set: adding a backend means adding
/// a variant here and an arm to the sink constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    #[default]
    File,
}

impl FromStr for SinkKind {
    type Err = UnknownSinkKind;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        if name.eq_ignore_ascii_case("file") {
            Ok(SinkKind::File)
        } else {
            Err(UnknownSinkKind(name.to_string()))
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkKind::File => write!(f, "file"),
        }
    }
}

/// The `single` option: route all output to one fixed file name
/// regardless of date.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SingleFile {
    Enabled(bool),
    Named(String),
}

impl Default for SingleFile {
    fn default() -> Self {
        SingleFile::Enabled(false)
    }
}

impl SingleFile {
    /// The fixed file name component, or `None` when date bucketing
    /// applies. `true` selects the literal name `single`.
    pub fn file_name(&self) -> Option<&str> {
        match self {
            SingleFile::Enabled(false) => None,
            SingleFile::Enabled(true) => Some("single"),
            SingleFile::Named(name) => Some(name),
        }
    }
}

/// The `apart_level` option: levels that get their own log file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ApartLevels {
    /// `true` splits every level apart, `false` none.
    All(bool),
    /// An explicit set of levels.
    Levels(Vec<String>),
}

impl Default for ApartLevels {
    fn default() -> Self {
        ApartLevels::Levels(Vec::new())
    }
}

impl ApartLevels {
    pub fn contains(&self, level: &str) -> bool {
        match self {
            ApartLevels::All(all) => *all,
            ApartLevels::Levels(levels) => levels.iter().any(|l| l == level),
        }
    }
}

/// Recognized logger options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sink selector.
    #[serde(rename = "type")]
    pub kind: SinkKind,
    /// Start with writing disabled.
    pub close: bool,
    /// Level allow-list; empty means all levels reach the sink.
    pub level: Vec<String>,
    /// Authorization key allow-list; empty means no gating.
    pub allow_key: Vec<String>,
    /// Record timestamp format (strftime).
    pub time_format: String,
    /// Single-file mode.
    pub single: SingleFile,
    /// Rotation threshold in bytes.
    pub file_size: u64,
    /// Storage root; `None` falls back to the platform state directory.
    pub path: Option<PathBuf>,
    /// Levels written to their own apart files.
    pub apart_level: ApartLevels,
    /// Maximum `*.log` files kept at the storage root; 0 = unlimited.
    pub max_files: usize,
    /// JSON records instead of delimited text.
    pub json: bool,
    /// Request id attached to enriched output; empty = generate one.
    pub app_guid: String,
    /// Application name attached to enriched output.
    pub app_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kind: SinkKind::default(),
            close: false,
            level: Vec::new(),
            allow_key: Vec::new(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            single: SingleFile::default(),
            file_size: DEFAULT_FILE_SIZE,
            path: None,
            apart_level: ApartLevels::default(),
            max_files: 0,
            json: false,
            app_guid: String::new(),
            app_name: String::new(),
        }
    }
}

impl Config {
    /// Parse a config from a TOML table. Unknown `type` names fail here.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// The storage root for log files.
    pub fn root(&self) -> PathBuf {
        match &self.path {
            Some(path) => path.clone(),
            None => default_root(),
        }
    }

    /// Whether `level` passes the allow-list. An empty allow-list
    /// enables everything.
    pub fn level_enabled(&self, level: &str) -> bool {
        self.level.is_empty() || self.level.iter().any(|l| l == level)
    }
}

/// `<state_dir>/reqlog/logs`, e.g. `~/.local/state/reqlog/logs`.
fn default_root() -> PathBuf {
    dirs::state_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("state")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("reqlog")
        .join("logs")
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
