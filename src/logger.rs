//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` / `debug_do!` for output gated on `--verbose`
//! - `success` / `failure` status lines for the end of a command
//!
//! Everything is written to stderr, so `dontknow query` can pipe JSON on
//! stdout without interleaving log lines.
//!
//! # Example
//!
//! ```ignore
//! log!("feed"; "{} items", items.len());
//! debug!("content"; "scanning {}", dir.display());
//! ```

use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use std::{
    io::{Write, stderr},
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

/// Execute code only when --verbose is enabled
///
/// Use this to avoid computing expensive debug data when not needed.
#[macro_export]
macro_rules! debug_do {
    ($($body:tt)*) => {{
        if $crate::logger::is_verbose() {
            $($body)*
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stderr = stderr().lock();
    execute!(stderr, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stderr, "{prefix} {message}").ok();
    stderr.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "build" => prefix.bright_blue().bold().to_string(),
        "feed" | "rss" => prefix.bright_green().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        "warning" => prefix.bright_magenta().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Status Lines
// ============================================================================

/// Format a status line: symbol followed by the message.
fn status_line(symbol: &str, message: &str) -> String {
    format!("{symbol} {message}")
}

/// Print a success line (✓ prefix, green).
pub fn success(message: &str) {
    let line = status_line(&"✓".green().to_string(), message);
    eprintln!("{line}");
}

/// Print a failure line (✗ prefix, red) with optional detail.
pub fn failure(summary: &str, detail: &str) {
    let message = if detail.is_empty() {
        summary.to_string()
    } else {
        format!("{summary}\n{detail}")
    };
    eprintln!("{}", status_line(&"✗".red().to_string(), &message));
}

/// Print the closing status line of a command.
///
/// Every command reports through here, so success and failure look the same
/// whichever command ran. Returns whether the command succeeded.
pub fn finish(command: &str, result: &anyhow::Result<String>, elapsed: Duration) -> bool {
    match result {
        Ok(summary) => {
            success(&format!("{summary} in {elapsed:.2?}"));
            true
        }
        Err(e) => {
            failure(&format!("{command} failed"), &format!("{e:#}"));
            false
        }
    }
}
