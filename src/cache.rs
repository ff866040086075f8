//! Per-address balance snapshot cache.
//!
//! One text file per address holds the raw CSV-like note listing most
//! recently fetched from the CLI; writing a new snapshot deletes every
//! prior file for that address first, so retention is exactly one. The
//! cache is an optimization, not a source of truth, and is never a failure
//! source: IO errors on either side are logged and absorbed. A write that
//! fails still returns the parsed entry, and a missing or unreadable
//! snapshot reads as the empty default entry.
//!
//! Concurrent writes for the same address race on the delete-then-write
//! step; the WalletManager serializes refreshes per address.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};

use crate::model::{BalanceCacheEntry, KeyVersion, Note};
use crate::units::nicks_to_nock;

#[derive(Clone, Debug)]
pub struct BalanceCache {
    dir: PathBuf,
}

impl BalanceCache {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Parse a raw note listing and persist it as the single snapshot for
    /// `address`. The text is stored as captured; parsing happens again on
    /// read, so a format fix benefits old snapshots too. IO failures are
    /// logged and absorbed: the parsed entry is returned either way.
    pub fn record_snapshot(&self, address: &str, raw_text: &str) -> BalanceCacheEntry {
        let notes = parse_note_rows(raw_text);
        let captured_at = Utc::now();

        if let Err(e) = fs::create_dir_all(&self.dir) {
            log::warn!(
                "Failed to create balance cache directory {}: {}",
                self.dir.display(),
                e
            );
            return entry_from_notes(address, Some(captured_at), notes);
        }
        for stale in self.files_for(address) {
            if let Err(e) = fs::remove_file(&stale) {
                log::warn!(
                    "Failed to remove stale balance cache file {}: {}",
                    stale.display(),
                    e
                );
            }
        }

        let path = self
            .dir
            .join(format!("{}_{}.csv", address, captured_at.timestamp()));
        match fs::write(&path, raw_text) {
            Ok(()) => log::debug!(
                "Cached balance snapshot for {} ({} notes)",
                address,
                notes.len()
            ),
            Err(e) => log::warn!(
                "Failed to write balance cache file {}: {}",
                path.display(),
                e
            ),
        }

        entry_from_notes(address, Some(captured_at), notes)
    }

    /// Most recent snapshot for `address`, or the empty default entry.
    pub fn read_snapshot(&self, address: &str) -> BalanceCacheEntry {
        let newest = self
            .files_for(address)
            .into_iter()
            .max_by_key(|path| modified_time(path));

        let Some(path) = newest else {
            return BalanceCacheEntry::empty(address);
        };

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!(
                    "Failed to read balance cache file {}: {}",
                    path.display(),
                    e
                );
                return BalanceCacheEntry::empty(address);
            }
        };

        let captured_at = modified_time(&path).map(DateTime::<Utc>::from);
        entry_from_notes(address, captured_at, parse_note_rows(&raw))
    }

    /// All snapshot files for an address, any timestamp.
    fn files_for(&self, address: &str) -> Vec<PathBuf> {
        let prefix = format!("{}_", address);
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect()
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

fn entry_from_notes(
    address: &str,
    captured_at: Option<DateTime<Utc>>,
    notes: Vec<Note>,
) -> BalanceCacheEntry {
    let total: u64 = notes.iter().map(|n| n.assets_nicks).sum();
    BalanceCacheEntry {
        address: address.to_string(),
        captured_at,
        total_balance_nicks: total,
        total_balance_nock: nicks_to_nock(total),
        notes,
    }
}

/// Parse CSV-like note rows. The delimited pass understands quoted fields
/// (commas and newlines inside quotes); if it recovers zero notes, a raw
/// line-split pass with the same column rules is tried before giving up.
fn parse_note_rows(raw: &str) -> Vec<Note> {
    let delimited: Vec<Note> = split_delimited(raw)
        .iter()
        .filter_map(|cols| note_from_columns(cols))
        .collect();
    if !delimited.is_empty() {
        return delimited;
    }

    raw.lines()
        .filter_map(|line| {
            let cols: Vec<String> = line.split(',').map(|c| c.trim().to_string()).collect();
            note_from_columns(&cols)
        })
        .collect()
}

/// Column mapping assumed from the CLI's CSV export: name at 0, version at
/// 1, source at 2, asset nicks at 3, block height at 4. A row needs more
/// than 3 columns and an integer asset column to be counted; anything else
/// (headers included) is skipped without aborting the parse.
fn note_from_columns(cols: &[String]) -> Option<Note> {
    if cols.len() <= 3 {
        return None;
    }
    let assets_nicks: u64 = cols[3].trim().parse().ok()?;

    Some(Note {
        name: cols[0].trim().to_string(),
        version: cols
            .get(1)
            .and_then(|v| KeyVersion::from_text(v))
            .unwrap_or_default(),
        assets_nicks,
        block_height: cols.get(4).map(|c| c.trim().to_string()).unwrap_or_default(),
        source: cols.get(2).map(|c| c.trim().to_string()).unwrap_or_default(),
    })
}

/// Quote-aware row splitter. A double quote opens a field that may span
/// commas and newlines; `""` inside a quoted field is a literal quote.
fn split_delimited(raw: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            }
            ',' if !in_quotes => {
                row.push(field.trim().to_string());
                field = String::new();
            }
            '\n' if !in_quotes => {
                row.push(field.trim().to_string());
                field = String::new();
                if row.iter().any(|f| !f.is_empty()) {
                    rows.push(std::mem::take(&mut row));
                } else {
                    row.clear();
                }
            }
            '\r' if !in_quotes => {}
            _ => field.push(c),
        }
    }

    row.push(field.trim().to_string());
    if row.iter().any(|f| !f.is_empty()) {
        rows.push(row);
    }

    rows
}
