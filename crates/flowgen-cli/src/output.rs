//! Terminal output formatting utilities.

use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;

static QUIET_MODE: AtomicBool = AtomicBool::new(false);

/// Set quiet mode globally. Call once at startup.
pub fn set_quiet(quiet: bool) {
    QUIET_MODE.store(quiet, Ordering::Relaxed);
}

fn is_quiet() -> bool {
    QUIET_MODE.load(Ordering::Relaxed)
}

/// Print a success message (suppressed in quiet mode).
pub fn success(msg: &str) {
    if !is_quiet() {
        println!("{} {}", "✓".green(), msg);
    }
}

/// Print an error message (always prints to stderr).
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a warning message (always prints to stderr).
pub fn warn(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print an info message (suppressed in quiet mode).
pub fn info(msg: &str) {
    if !is_quiet() {
        println!("{} {}", "→".blue(), msg);
    }
}

/// Print a detail line without prefix (suppressed in quiet mode).
///
/// Use for indented detail lines that accompany info or warn messages.
pub fn detail(msg: &str) {
    if !is_quiet() {
        println!("{msg}");
    }
}

/// Print essential machine-readable output (always prints).
pub fn essential(msg: &str) {
    println!("{msg}");
}

/// Print a section heading with a blank line before it (suppressed in quiet mode).
pub fn heading(msg: &str) {
    if !is_quiet() {
        println!();
        println!("{}", msg.bold());
    }
}

/// Echo an external command before it runs (suppressed in quiet mode).
pub fn command(cmd: &str) {
    if !is_quiet() {
        println!("{} {}", ">".dimmed(), cmd.dimmed());
    }
}

/// Label a guideline note as followed or violated.
#[must_use]
pub fn verdict(followed: bool) -> String {
    if followed {
        "[OK]".green().to_string()
    } else {
        "[BAD]".red().to_string()
    }
}

/// Quote a line of file content for display.
#[must_use]
pub fn quoted(text: &str) -> String {
    format!("\"{text}\"")
}

/// Print a horizontal line (suppressed in quiet mode).
pub fn hr() {
    if !is_quiet() {
        println!("{}", "─".repeat(50).dimmed());
    }
}
