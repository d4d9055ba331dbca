//! CLI output formatting.
//!
//! Human-readable styled lines by default, one JSON object per line with
//! `--json`, nothing but errors with `--quiet`.

use std::fmt::Display;
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use serde_json::json;

/// Output settings from the global CLI flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    pub json: bool,
    pub quiet: bool,
}

static OUTPUT_CONFIG: OnceLock<OutputConfig> = OnceLock::new();

fn config() -> OutputConfig {
    OUTPUT_CONFIG.get().copied().unwrap_or_default()
}

fn emit_json_line(kind: &str, payload: serde_json::Value) {
    println!(
        "{}",
        json!({
            "type": kind,
            "payload": payload,
        })
    );
}

/// Apply output settings. Only the first call takes effect.
pub fn configure(settings: OutputConfig) {
    let _ = OUTPUT_CONFIG.set(settings);
}

#[must_use]
pub fn is_json() -> bool {
    config().json
}

#[must_use]
pub fn is_quiet() -> bool {
    config().quiet
}

/// Print a section heading.
pub fn section(title: &str) {
    let config = config();
    if config.json {
        emit_json_line("section", json!({ "title": title }));
    } else if !config.quiet {
        println!();
        println!("{}", title.bold());
    }
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let config = config();
    let value = value.to_string();
    if config.json {
        emit_json_line("field", json!({ "label": label, "value": value }));
    } else if !config.quiet {
        println!("  {:<14} {}", label.dimmed(), value);
    }
}

pub fn success(message: &str) {
    let config = config();
    if config.json {
        emit_json_line("success", json!({ "message": message }));
    } else if !config.quiet {
        println!("{} {}", "✓".green(), message);
    }
}

pub fn warning(message: &str) {
    let config = config();
    if config.json {
        emit_json_line("warning", json!({ "message": message }));
    } else if !config.quiet {
        println!("{} {}", "!".yellow(), message);
    }
}

/// Print an error. Shown even in quiet mode.
pub fn error(message: &str) {
    if config().json {
        emit_json_line("error", json!({ "message": message }));
    } else {
        eprintln!("{} {}", "error:".red().bold(), message);
    }
}

/// Print a JSON document verbatim, regardless of mode.
pub fn document(value: &impl serde::Serialize) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => error(&format!("failed to render output: {e}")),
    }
}
