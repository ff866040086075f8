//! Scanners for `list-notes` and `list-notes-by-address`.
//!
//! Notes arrive as labelled blocks separated by `―` runs:
//!
//! ```text
//! Details
//! - Name: [<address> <note-id>]
//! - Version: 1
//! - Assets: 65536
//! - Block Height: 120
//! - Source: <source-id>
//! Lock
//! - Required Signatures: 1
//! - Signers: <address>
//! ```
//!
//! A note is complete once its `Source` has been seen. Separators, blank
//! lines and log lines flush a complete open note; a new `- Name:` emits
//! the previous note if it was complete and starts a fresh one. Incomplete
//! notes are dropped, never emitted half-filled.

use super::{bracket_contents, first_digit_run, first_u64, is_noise, sanitize};
use crate::model::{KeyVersion, Note, NoteList};

const HEADER_WORDS: [&str; 5] = [
    "Wallet Notes",
    "Details",
    "Lock",
    "Required Signatures",
    "Signers",
];

#[derive(Default)]
struct NoteBuilder {
    name: String,
    version: KeyVersion,
    assets_nicks: u64,
    block_height: String,
    source: Option<String>,
}

impl NoteBuilder {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// A note only counts once its source has been observed.
    fn finish(self) -> Option<Note> {
        let source = self.source?;
        Some(Note {
            name: self.name,
            version: self.version,
            assets_nicks: self.assets_nicks,
            block_height: self.block_height,
            source,
        })
    }
}

/// Move the open note into `notes` if it is complete; an incomplete note
/// stays open and keeps accumulating.
fn flush(current: &mut Option<NoteBuilder>, notes: &mut Vec<Note>) {
    if current.as_ref().is_some_and(|n| n.source.is_some()) {
        if let Some(done) = current.take().and_then(NoteBuilder::finish) {
            notes.push(done);
        }
    }
}

fn scan_note_blocks(clean: &str) -> Vec<Note> {
    let mut notes = Vec::new();
    let mut current: Option<NoteBuilder> = None;

    for raw in clean.lines() {
        let line = raw.trim();

        if is_noise(line) {
            flush(&mut current, &mut notes);
            continue;
        }

        if HEADER_WORDS.iter().any(|h| line.contains(h)) {
            continue;
        }

        if line.starts_with("- Name:") {
            flush(&mut current, &mut notes);
            current = Some(NoteBuilder::new(bracket_contents(line).unwrap_or("")));
            continue;
        }

        let Some(note) = current.as_mut() else {
            continue;
        };

        if let Some(value) = line.strip_prefix("- Version:") {
            if let Some(version) = KeyVersion::from_text(value) {
                note.version = version;
            }
        } else if line.starts_with("- Assets:") {
            if let Some(nicks) = first_u64(line) {
                note.assets_nicks = nicks;
            }
        } else if line.starts_with("- Block Height:") {
            if let Some(height) = first_digit_run(line) {
                note.block_height = height.to_string();
            }
        } else if let Some(value) = line.strip_prefix("- Source:") {
            note.source = Some(value.trim().to_string());
        }
    }

    flush(&mut current, &mut notes);

    notes
}

/// Scan whole-wallet `list-notes` output.
pub fn scan_notes(output: &str) -> NoteList {
    let clean = sanitize(output);
    NoteList::from_notes(scan_note_blocks(&clean))
}

/// Scan `list-notes-by-address` output. Same block shape, preceded by a
/// `Wallet Notes for Address` header naming the queried address.
pub fn scan_notes_by_address(output: &str) -> NoteList {
    let clean = sanitize(output);
    NoteList::from_notes(scan_note_blocks(&clean))
}
