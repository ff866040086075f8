//! Scanners for `list-master-addresses` and `list-active-addresses`.
//!
//! The address listing is the drift-heaviest shape the CLI has. A value can
//! sit inline after `- Address:` or wrap across the following lines, the
//! `(active)` marker can be appended to the value, stand on its own line or
//! follow one or more blank lines, and the version may be inline or on the
//! line below its label. All of those are normalised here.

use super::{sanitize, LineCursor, SEPARATOR_CHAR};
use crate::model::{ActiveAddressRecord, Address, KeyVersion, MasterAddressList};

const ACTIVE_MARKER: &str = "(active)";

pub fn scan_master_addresses(output: &str) -> MasterAddressList {
    let clean = sanitize(output);
    let mut result = MasterAddressList::default();

    let mut cur = LineCursor::new(&clean);
    while let Some(raw) = cur.peek() {
        let line = raw.trim();

        let Some(rest) = line.strip_prefix("- Address:") else {
            cur.advance();
            continue;
        };

        let inline = rest.trim();
        let (value_text, mut is_active) = if inline.is_empty() {
            collect_wrapped_address(&cur)
        } else {
            (inline.to_string(), inline.contains(ACTIVE_MARKER))
        };

        let address = value_text.replace(ACTIVE_MARKER, "").trim().to_string();

        // Marker on its own line, possibly after blank lines.
        if !is_active && !address.is_empty() {
            if let Some(idx) = cur.next_non_blank(cur.pos() + 1) {
                if cur.line_at(idx).map(str::trim) == Some(ACTIVE_MARKER) {
                    is_active = true;
                }
            }
        }

        let version = lookahead_version(&cur);

        if !address.is_empty() {
            if is_active {
                result.active_address = address.clone();
            }
            result.addresses.push(Address {
                value: address,
                version,
                is_active,
            });
        }

        cur.advance();
    }

    result
}

/// Collect a wrapped address value from the lines after the label.
/// Stops at the version label, a separator, the next address, or a blank
/// run that leads straight into one of those. An `(active)` line inside
/// the run marks the address active.
fn collect_wrapped_address(cur: &LineCursor<'_>) -> (String, bool) {
    let mut parts: Vec<&str> = Vec::new();
    let mut j = cur.pos() + 1;

    while let Some(raw) = cur.line_at(j) {
        let line = raw.trim();

        if line.starts_with("- Version:")
            || line.starts_with(SEPARATOR_CHAR)
            || line.starts_with("- Address:")
        {
            break;
        }
        if line == ACTIVE_MARKER {
            return (parts.concat(), true);
        }
        if line.is_empty() {
            // Blank run followed by a version label or separator ends the
            // value; blanks in the middle of a wrapped value are skipped.
            if let Some(k) = cur.next_non_blank(j + 1) {
                if let Some(peek) = cur.line_at(k) {
                    let peek = peek.trim();
                    if peek.starts_with("- Version:") || peek.starts_with(SEPARATOR_CHAR) {
                        break;
                    }
                }
            }
            j += 1;
            continue;
        }

        parts.push(line);
        j += 1;
    }

    (parts.concat(), false)
}

/// Find this address's version on the following lines, skipping separators
/// and blanks, stopping at the next record. Defaults to version 1.
fn lookahead_version(cur: &LineCursor<'_>) -> KeyVersion {
    let mut j = cur.pos() + 1;

    while let Some(raw) = cur.line_at(j) {
        let line = raw.trim();

        if line.is_empty()
            || line.starts_with(SEPARATOR_CHAR)
            || (line.starts_with('-') && !line.starts_with("- "))
        {
            j += 1;
            continue;
        }

        if let Some(value) = line.strip_prefix("- Version:") {
            let mut value = value.trim();
            // Value may sit on the line below the label.
            if value.is_empty() {
                if let Some(k) = cur.next_non_blank(j + 1) {
                    if let Some(below) = cur.line_at(k) {
                        let below = below.trim();
                        if below.chars().next().is_some_and(|c| c.is_ascii_digit()) {
                            value = below;
                        }
                    }
                }
            }
            return KeyVersion::from_text(value).unwrap_or(KeyVersion::V1);
        }

        if line.starts_with("- Address:") || line.starts_with("Master") {
            break;
        }

        j += 1;
    }

    KeyVersion::V1
}

/// Scanner for `list-active-addresses` output. Only the `Signing` section
/// yields the record; the watch-only section is recognised but skipped.
pub fn scan_active_address(output: &str) -> ActiveAddressRecord {
    let clean = sanitize(output);
    let mut result = ActiveAddressRecord {
        raw_output: clean.clone(),
        ..Default::default()
    };

    let mut in_signing = false;
    for raw in clean.lines() {
        let line = raw.trim();

        if line.is_empty()
            || line.starts_with("I ")
            || line.starts_with('[')
            || line.starts_with(SEPARATOR_CHAR)
        {
            continue;
        }

        if line.contains("Addresses -- Signing") {
            in_signing = true;
            continue;
        }
        if line.contains("Addresses -- Watch only") {
            in_signing = false;
            continue;
        }
        if !in_signing {
            continue;
        }

        if let Some(value) = line.strip_prefix("- Address:") {
            let value = value.trim();
            if !value.is_empty() {
                result.address = value.to_string();
                result.kind = "Signing".to_string();
            }
        } else if let Some(value) = line.strip_prefix("- Version:") {
            let value = value.trim();
            if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
                result.version = KeyVersion::from_text(value);
            }
        }
    }

    result
}
