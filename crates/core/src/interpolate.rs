// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `{placeholder}` substitution for log message templates.

use indexmap::IndexMap;
use serde_json::Value;

/// Context values substituted into message templates.
pub type ContextVars = IndexMap<String, Value>;

/// Substitute each `{key}` token in `template` with its context value.
///
/// Single-pass token scan, not regex: a replaced value is never re-scanned
/// for further placeholders. Unmatched `{key}` tokens are left verbatim;
/// context keys with no matching token are ignored.
pub fn interpolate(template: &str, vars: &ContextVars) -> String {
    if vars.is_empty() {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let token = &rest[start..];
        let hit = token
            .find('}')
            .and_then(|end| vars.get(&token[1..end]).map(|value| (end, value)));
        match hit {
            Some((end, value)) => {
                out.push_str(&render(value));
                rest = &token[end + 1..];
            }
            // No closing brace or unknown key: keep the `{` and move on
            None => {
                out.push('{');
                rest = &token[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Placeholder rendering: strings without quotes, everything else as JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "interpolate_tests.rs"]
mod tests;
