//! Line-oriented scanners for `nockchain-wallet` output.
//!
//! Each CLI output shape gets its own small state machine over an immutable
//! line sequence. Shared conventions:
//!
//! - noise lines (blank, `I ` / `[` log prefixes, `―` separator runs) are
//!   skip tokens that may also close an open record;
//! - a field value may sit on the label line, on continuation lines until
//!   the next label / blank / separator, or wrapped in quotes;
//! - numeric sub-fields are pulled out by first-run-of-digits, never by
//!   column position, because the surrounding text varies across versions;
//! - unrecognised lines are ignored. Scanners never fail: a missing field
//!   stays at its zero value and the caller decides what that means.

mod addresses;
mod balance;
mod cursor;
mod import;
mod keygen;
mod master_pubkey;
mod notes;

pub use addresses::{scan_active_address, scan_master_addresses};
pub use balance::scan_balance;
pub use import::scan_import;
pub use keygen::scan_keygen;
pub use master_pubkey::scan_master_pubkey;
pub use notes::{scan_notes, scan_notes_by_address};

pub(crate) use cursor::LineCursor;

use once_cell::sync::Lazy;
use regex::Regex;

/// Box-drawing dash used by the CLI as a record separator.
pub(crate) const SEPARATOR_CHAR: char = '―';

static ANSI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1B(?:[@-Z\\-_]|\[[0-?]*[ -/]*[@-~])").expect("valid regex"));

static DIGIT_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid regex"));

static BRACKET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(.*?)\]").expect("valid regex"));

/// Remove ANSI escape sequences (CSI sequences and single-character
/// escapes) from raw command output. Everything else, newlines included,
/// is preserved verbatim, so line count and order never change.
pub fn sanitize(text: &str) -> String {
    ANSI_RE.replace_all(text, "").into_owned()
}

/// First run of decimal digits in a line, as text.
pub(crate) fn first_digit_run(line: &str) -> Option<&str> {
    DIGIT_RUN_RE.find(line).map(|m| m.as_str())
}

/// First run of decimal digits in a line, parsed.
pub(crate) fn first_u64(line: &str) -> Option<u64> {
    first_digit_run(line)?.parse().ok()
}

/// Contents of the first `[..]` pair in a line.
pub(crate) fn bracket_contents(line: &str) -> Option<&str> {
    BRACKET_RE
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Blank lines, log lines and separator runs.
pub(crate) fn is_noise(line: &str) -> bool {
    line.is_empty()
        || line.starts_with("I ")
        || line.starts_with('[')
        || line.starts_with(SEPARATOR_CHAR)
}
