//! Scanner for `keygen` output.
//!
//! The shape has drifted across CLI releases: headers stand on their own
//! line with the value below ("Address"), extended keys wrap across several
//! lines until the next header or a blank, and the seed phrase may be
//! quoted across lines. The version digit can sit on the header line or
//! the one after it.

use super::{sanitize, LineCursor};
use crate::model::{KeyMaterial, KeyVersion};

pub fn scan_keygen(output: &str) -> KeyMaterial {
    let clean = sanitize(output);
    let mut result = KeyMaterial {
        raw_output: clean.clone(),
        ..Default::default()
    };

    let mut cur = LineCursor::new(&clean);
    while let Some(raw) = cur.peek() {
        let line = raw.trim();

        if line.is_empty() || line.starts_with("I ") || line.starts_with('[') {
            cur.advance();
            continue;
        }

        // Standalone "Address" header; value is the next non-blank line.
        if line == "Address" {
            cur.advance();
            cur.skip_blank();
            if let Some(value) = cur.peek() {
                result.address = value.trim().to_string();
            }
            continue;
        }

        if line.contains("Extended Private Key") {
            cur.advance();
            result.extended_private_key =
                collect_wrapped(&mut cur, "Extended Public Key").concat();
            continue;
        }

        if line.contains("Extended Public Key") {
            cur.advance();
            result.extended_public_key = collect_wrapped(&mut cur, "Seed Phrase").concat();
            continue;
        }

        if line.contains("Seed Phrase") {
            cur.advance();
            let words: Vec<String> = collect_wrapped(&mut cur, "Version")
                .into_iter()
                .map(|part| {
                    part.trim_matches(|c| c == '\'' || c == '"')
                        .to_string()
                })
                .collect();
            result.seed_phrase = words.join(" ");
            continue;
        }

        if let Some(rest) = line.strip_prefix("Version") {
            let inline = rest.trim_start_matches(':').trim();
            if inline.chars().next().is_some_and(|c| c.is_ascii_digit()) {
                result.version = KeyVersion::from_text(inline);
                cur.advance();
                continue;
            }
            cur.advance();
            cur.skip_blank();
            if let Some(value) = cur.peek() {
                let value = value.trim();
                if value.chars().next().is_some_and(|c| c.is_ascii_digit()) {
                    result.version = KeyVersion::from_text(value);
                }
            }
            continue;
        }

        cur.advance();
    }

    result
}

/// Consume continuation lines until a blank line or a line containing the
/// next header. The terminator itself is left for the main loop.
fn collect_wrapped<'a>(cur: &mut LineCursor<'a>, next_header: &str) -> Vec<&'a str> {
    let mut parts = Vec::new();
    while let Some(raw) = cur.peek() {
        let line = raw.trim();
        if line.is_empty() || raw.contains(next_header) {
            break;
        }
        parts.push(line);
        cur.advance();
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYGEN_OUTPUT: &str = "\
I wallet: derived master key
Address

BLFpkeygen0000000000000000000000

Extended Private Key
zprvAAAAAAAAAAAAAAA
BBBBBBBBBBBBBBBB

Extended Public Key
zpubCCCCCCCCCCCCCCC
DDDDDDDDDDDDDDDD

Seed Phrase
'abandon ability able about above absent
absorb abstract absurd abuse access accident'

Version
1
";

    #[test]
    fn test_scan_keygen_full_output() {
        let result = scan_keygen(KEYGEN_OUTPUT);
        assert_eq!(result.address, "BLFpkeygen0000000000000000000000");
        assert_eq!(
            result.extended_private_key,
            "zprvAAAAAAAAAAAAAAABBBBBBBBBBBBBBBB"
        );
        assert_eq!(
            result.extended_public_key,
            "zpubCCCCCCCCCCCCCCCDDDDDDDDDDDDDDDD"
        );
        assert_eq!(
            result.seed_phrase,
            "abandon ability able about above absent absorb abstract absurd abuse access accident"
        );
        assert_eq!(result.version, Some(KeyVersion::V1));
    }

    #[test]
    fn test_scan_keygen_inline_version() {
        let result = scan_keygen("Address\nBLFpX\n\nVersion: 0\n");
        assert_eq!(result.address, "BLFpX");
        assert_eq!(result.version, Some(KeyVersion::V0));
    }

    #[test]
    fn test_scan_keygen_colored_output() {
        let colored = KEYGEN_OUTPUT.replace("Address", "\x1b[1;32mAddress\x1b[0m");
        let result = scan_keygen(&colored);
        assert_eq!(result.address, "BLFpkeygen0000000000000000000000");
    }

    #[test]
    fn test_scan_keygen_unrecognised_text_yields_defaults() {
        let result = scan_keygen("something the tool printed\nthat we do not know\n");
        assert_eq!(result.address, "");
        assert_eq!(result.extended_private_key, "");
        assert_eq!(result.version, None);
        assert!(!result.raw_output.is_empty());
    }
}
