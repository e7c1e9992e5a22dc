/// Log formatting and output with ANSI colors
///
/// Handles colorized console output with aligned tags, highlighting of base58
/// addresses and transaction signatures, and the plain file copy.
use super::file::write_to_file;
use super::tags::LogTag;
use chrono::Local;
use colored::*;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::{self, Write};

/// Fixed tag column width for alignment
const TAG_WIDTH: usize = 7;

static ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([1-9A-HJ-NP-Za-km-z]{32,44})").unwrap());
static SIGNATURE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([1-9A-HJ-NP-Za-km-z]{80,90})").unwrap());

/// Format and output a log message to console and file
pub fn format_and_log(tag: LogTag, log_type: &str, message: &str) {
    let now = Local::now();
    let time = now.format("%H:%M:%S").to_string();

    let console_line = format!(
        "{} [{}] [{}] {}",
        time.dimmed(),
        format_tag(&tag),
        format_log_type(log_type),
        highlight_message(message)
    );
    println!("{}", console_line);
    let _ = io::stdout().flush();

    let file_line = format!(
        "{} [{}] [{}] {}",
        now.format("%Y-%m-%d %H:%M:%S"),
        tag.as_str(),
        log_type,
        message
    );
    write_to_file(&file_line);
}

/// Format a tag with its color, padded to the tag column width
fn format_tag(tag: &LogTag) -> ColoredString {
    let padded = format!("{:<width$}", tag.as_str(), width = TAG_WIDTH);
    match tag {
        LogTag::System => padded.bright_yellow().bold(),
        LogTag::Wallet => padded.bright_magenta().bold(),
        LogTag::Rpc => padded.bright_green().bold(),
        LogTag::Sweep => padded.bright_cyan().bold(),
        LogTag::Prompt => padded.bright_blue().bold(),
    }
}

/// Color the log type by its meaning
fn format_log_type(log_type: &str) -> ColoredString {
    match log_type {
        "SUCCESS" => log_type.green().bold(),
        "ERROR" | "FAILED" => log_type.red().bold(),
        "WARNING" => log_type.yellow().bold(),
        "DEBUG" => log_type.purple(),
        _ => log_type.cyan(),
    }
}

/// Shorten and highlight base58 addresses and transaction signatures
fn highlight_message(message: &str) -> String {
    // Signatures first so the address pattern does not split them
    let highlighted = SIGNATURE_RE.replace_all(message, |caps: &regex::Captures| {
        let sig = &caps[1];
        format!(
            "{}...{}",
            sig[..12].bright_yellow().bold(),
            sig[sig.len() - 8..].bright_yellow().bold()
        )
    });

    ADDRESS_RE
        .replace_all(&highlighted, |caps: &regex::Captures| {
            let addr = &caps[1];
            format!(
                "{}...{}",
                addr[..8].bright_cyan().bold(),
                addr[addr.len() - 4..].bright_cyan().bold()
            )
        })
        .to_string()
}
