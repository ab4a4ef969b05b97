//! Shared CLI output helpers.
//!
//! Human-readable output uses colored status symbols when stdout is a
//! terminal. In JSON mode every helper emits one `{"type", "payload"}` line
//! instead, so scripts can consume the same commands.

use std::fmt::Display;

use owo_colors::{OwoColorize, Stream};
use parking_lot::{const_rwlock, RwLock};
use serde_json::json;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON lines instead of text.
    pub json: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool) -> Self {
        Self { json }
    }
}

static OUTPUT_CONFIG: RwLock<OutputConfig> = const_rwlock(OutputConfig { json: false });

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    *OUTPUT_CONFIG.write() = config;
}

/// Return whether JSON output is enabled.
#[must_use]
pub fn is_json() -> bool {
    OUTPUT_CONFIG.read().json
}

/// Emit a JSON line with type and payload structure.
pub fn json_line(kind: &str, payload: serde_json::Value) {
    println!("{}", json!({ "type": kind, "payload": payload }));
}

/// Print a section header.
pub fn section(title: &str) {
    if is_json() {
        json_line("section", json!({ "title": title }));
        return;
    }
    println!();
    println!("{}", title.if_supports_color(Stream::Stdout, |t| t.bold()));
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    if is_json() {
        json_line("field", json!({ "label": label, "value": value }));
        return;
    }
    println!(
        "  {:<14} {}",
        label.if_supports_color(Stream::Stdout, |l| l.dimmed()),
        value
    );
}

/// Print a success line.
pub fn success(message: &str) {
    if is_json() {
        json_line("success", json!({ "message": message }));
        return;
    }
    println!("  {} {message}", "✓".if_supports_color(Stream::Stdout, |s| s.green()));
}

/// Print a warning line.
pub fn warning(message: &str) {
    if is_json() {
        json_line("warning", json!({ "message": message }));
        return;
    }
    println!("  {} {message}", "⚠".if_supports_color(Stream::Stdout, |s| s.yellow()));
}

/// Print an error line to stderr.
pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", json!({ "type": "error", "payload": { "message": message } }));
        return;
    }
    eprintln!("  {} {message}", "×".if_supports_color(Stream::Stderr, |s| s.red()));
}

/// Print a note/hint.
pub fn note(message: &str) {
    if is_json() {
        json_line("note", json!({ "message": message }));
        return;
    }
    println!("  {message}");
}

/// Format a highlighted value in cyan.
pub fn highlight(value: impl Display) -> String {
    let value = value.to_string();
    if is_json() {
        return value;
    }
    value.if_supports_color(Stream::Stdout, |v| v.cyan()).to_string()
}

