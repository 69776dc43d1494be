//! Installer output protocol
//!
//! The installer script reports progress through prefixed lines:
//!
//! - `PROGRESS:<0-100>` sets the progress bar
//! - `ERROR:<message>` raises an error notice
//! - `INFO:<message>` is protocol chatter and never shown
//!
//! Everything else is plain log output.

pub const PROGRESS_PREFIX: &str = "PROGRESS:";
pub const ERROR_PREFIX: &str = "ERROR:";
pub const INFO_PREFIX: &str = "INFO:";

/// Highest value a progress line may carry
pub const MAX_PROGRESS: u8 = 100;

/// Classification of a single (already trimmed) output line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Progress(u8),
    Error(&'a str),
    Info(&'a str),
    Plain(&'a str),
}

/// Classify one line of installer output.
///
/// A `PROGRESS:` line whose payload is not a plain decimal in `0..=100`
/// is treated as a plain log line.
pub fn classify_line(line: &str) -> LineKind<'_> {
    if let Some(payload) = line.strip_prefix(PROGRESS_PREFIX) {
        return match parse_percent(payload) {
            Some(value) => LineKind::Progress(value),
            None => LineKind::Plain(line),
        };
    }

    if let Some(message) = line.strip_prefix(ERROR_PREFIX) {
        return LineKind::Error(message);
    }

    if let Some(message) = line.strip_prefix(INFO_PREFIX) {
        return LineKind::Info(message);
    }

    LineKind::Plain(line)
}

fn parse_percent(payload: &str) -> Option<u8> {
    if payload.is_empty() || !payload.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    payload
        .parse::<u32>()
        .ok()
        .filter(|v| *v <= u32::from(MAX_PROGRESS))
        .map(|v| v as u8)
}
