//! Styled terminal output utilities.
//!
//! Reports go to stdout; errors and their hints go to stderr.

use owo_colors::OwoColorize;

/// Width of the key column in [`kv`] lines.
const KEY_WIDTH: usize = 14;

/// Print a title underlined to its width
pub fn header(text: &str) {
    let rule = "─".repeat(text.chars().count());
    println!("\n{}\n{}\n", text.bold().cyan(), rule.dimmed());
}

/// Print a section title
pub fn section(text: &str) {
    println!("{}", text.bold().white());
}

/// Print an indented `key  value` line with keys aligned
pub fn kv(key: &str, value: &str) {
    let padded = format!("{:<width$}", key, width = KEY_WIDTH);
    println!("  {} {}", padded.dimmed(), value);
}

/// Print a success message
pub fn success(text: &str) {
    println!("{} {}", "✔".green().bold(), text.green());
}

/// Print a warning message
pub fn warn(text: &str) {
    println!("{} {}", "⚠".yellow().bold(), text.yellow());
}

/// Print an error message to stderr
pub fn error(text: &str) {
    eprintln!("{} {}", "✖".red().bold(), text.red());
}

/// Print a help line under an error
pub fn hint(text: &str) {
    eprintln!("  {} {}", "help:".cyan().bold(), text);
}

/// Print an empty line
pub fn newline() {
    println!();
}

/// Print a muted footer line
pub fn dim(text: &str) {
    println!("{}", text.dimmed());
}
