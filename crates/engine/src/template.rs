// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `${name}` placeholder interpolation for pipeline commands

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Matches `${name}` only. Shell forms like `${VAR:-default}` or `${#VAR}`
/// do not match and are left for bash.
// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("constant regex pattern is valid")
});

/// Escape a value for use inside a double-quoted shell string.
///
/// Backslash, double quote, dollar and backtick are the only characters
/// bash treats specially between double quotes.
pub fn escape_for_shell(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Replace `${name}` placeholders with values from `vars`.
///
/// Unknown names are left as-is.
pub fn interpolate(template: &str, vars: &HashMap<String, String>) -> String {
    interpolate_inner(template, vars, false)
}

/// Like [`interpolate`], but escapes substituted values with
/// [`escape_for_shell`]. Commands should wrap placeholders in double quotes.
pub fn interpolate_shell(template: &str, vars: &HashMap<String, String>) -> String {
    interpolate_inner(template, vars, true)
}

fn interpolate_inner(template: &str, vars: &HashMap<String, String>, shell_escape: bool) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &regex::Captures| match vars.get(&caps[1]) {
            Some(val) if shell_escape => escape_for_shell(val),
            Some(val) => val.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
