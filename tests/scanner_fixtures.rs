//! Scanner tests over captured CLI output, including the colorized raw
//! form the tool actually prints. Fixtures mix log lines, separators and
//! format drift the way real output does.

use nockwallet::model::KeyVersion;
use nockwallet::scan::{
    sanitize, scan_balance, scan_import, scan_keygen, scan_master_addresses,
    scan_notes_by_address,
};
use nockwallet::units::nicks_to_nock;

const RAW_KEYGEN: &str = "\
I \x1b[2m(wallet)\x1b[0m derived new master key
\x1b[1;32mAddress\x1b[0m

BLFpYjKkNrSibnnDBEnGAHSLHxLrKZrzpl

\x1b[1mExtended Private Key\x1b[0m
zprvAbCdEfGhIjKlMnOpQrStUvWxYz0123
456789AbCdEfGhIjKlMnOp

\x1b[1mExtended Public Key\x1b[0m
zpubAbCdEfGhIjKlMnOpQrStUvWxYz9876
543210ZyXwVuTsRqPoNmLk

\x1b[1mSeed Phrase\x1b[0m
'abandon ability able about above absent
absorb abstract absurd abuse access accident'

\x1b[1mVersion\x1b[0m
1
";

#[test]
fn keygen_output_end_to_end() {
    let result = scan_keygen(RAW_KEYGEN);
    assert_eq!(result.address, "BLFpYjKkNrSibnnDBEnGAHSLHxLrKZrzpl");
    assert_eq!(
        result.extended_private_key,
        "zprvAbCdEfGhIjKlMnOpQrStUvWxYz0123456789AbCdEfGhIjKlMnOp"
    );
    assert_eq!(
        result.extended_public_key,
        "zpubAbCdEfGhIjKlMnOpQrStUvWxYz9876543210ZyXwVuTsRqPoNmLk"
    );
    assert_eq!(
        result.seed_phrase,
        "abandon ability able about above absent absorb abstract absurd abuse access accident"
    );
    assert_eq!(result.version, Some(KeyVersion::V1));
    // The audit echo is sanitized but otherwise intact.
    assert!(!result.raw_output.contains('\x1b'));
    assert_eq!(result.raw_output.lines().count(), RAW_KEYGEN.lines().count());
}

#[test]
fn sanitize_is_idempotent_and_preserves_lines() {
    let once = sanitize(RAW_KEYGEN);
    assert_eq!(sanitize(&once), once);
    assert_eq!(once.lines().count(), RAW_KEYGEN.lines().count());
}

// Wrapped address value, marker and version each on their own line,
// closed by a separator.
#[test]
fn wrapped_active_address_block() {
    let output = "\
- Address:
BLFp0000000000000000000000000000
(active)
- Version:
1
―――――
";
    let result = scan_master_addresses(output);
    assert_eq!(result.addresses.len(), 1);
    assert_eq!(
        result.addresses[0].value,
        "BLFp0000000000000000000000000000"
    );
    assert_eq!(result.addresses[0].version, KeyVersion::V1);
    assert!(result.addresses[0].is_active);
    assert_eq!(result.active_address, "BLFp0000000000000000000000000000");
}

// Both historical shapes of the same listing normalize identically.
#[test]
fn marker_position_does_not_change_result() {
    let inline = "- Address: BLFpsameaddress00000000000000000 (active)\n- Version: 0\n";
    let own_line = "- Address: BLFpsameaddress00000000000000000\n(active)\n- Version: 0\n";
    let after_blanks =
        "- Address: BLFpsameaddress00000000000000000\n\n\n(active)\n- Version: 0\n";

    for output in [inline, own_line, after_blanks] {
        let result = scan_master_addresses(output);
        assert_eq!(result.addresses.len(), 1, "input: {:?}", output);
        assert!(result.addresses[0].is_active, "input: {:?}", output);
        assert_eq!(
            result.active_address, "BLFpsameaddress00000000000000000",
            "input: {:?}",
            output
        );
        assert_eq!(result.addresses[0].version, KeyVersion::V0);
    }
}

#[test]
fn note_listing_totals_are_integer_sums() {
    let output = "\
Wallet Notes for Address
BLFpnotes000000000000000000000000
――――――――――――――――――――――――――

Details
- Name: [BLFpnotes first]
- Version: 1
- Assets: 65536
- Block Height: 120
- Source: src-1
Lock
- Required Signatures: 1
- Signers: BLFpnotes000000000000000000000000
――――――――――――――――――――――――――
Details
- Name: [BLFpnotes second]
- Version: 1
- Assets: 32768
- Block Height: 121
- Source: src-2
――――――――――――――――――――――――――
Details
- Name: [BLFpnotes third]
- Version: 0
- Assets: 0
- Block Height: 122
- Source: src-3
――――――――――――――――――――――――――
";
    let result = scan_notes_by_address(output);
    assert_eq!(result.notes.len(), 3);
    assert_eq!(result.total_balance_nicks, 98304);
    assert_eq!(result.total_balance_nock, 1.5);
    assert_eq!(result.total_balance_nock, nicks_to_nock(98304));

    let names: Vec<_> = result.notes.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(
        names,
        ["BLFpnotes first", "BLFpnotes second", "BLFpnotes third"]
    );
}

#[test]
fn import_and_balance_shapes() {
    let import = scan_import(
        "Master Key (Imported)\n- Address: BLFpimport0000000000000000000000\n- Version: 1\n",
    );
    assert_eq!(import.address, "BLFpimport0000000000000000000000");
    assert_eq!(import.version, Some(KeyVersion::V1));

    let balance = scan_balance(
        "Balance successfully retrieved from block 0xdeadbeef at height 38.999\n\
         - Wallet Version: 1.0.2\n\
         - Number of Notes: 2\n\
         - Balance: 131072 nicks (2 NOCK)\n",
    );
    assert_eq!(balance.balance_nicks, 131072);
    assert_eq!(balance.balance_nock, 2.0);
    assert_eq!(balance.block_height, "38.999");
    assert_eq!(balance.block_hash, "0xdeadbeef");
    assert_eq!(balance.num_notes, 2);
    assert_eq!(balance.version, "1.0.2");
}

// Garbled output must come back as zero-value records, never a panic.
#[test]
fn garbled_output_degrades_to_defaults() {
    let garbage = "\x1b[31m???\x1b[0m\ntotally unexpected\n\u{2015}\u{2015}\n- Address:\n";
    let listing = scan_master_addresses(garbage);
    assert!(listing.addresses.is_empty());

    let keys = scan_keygen(garbage);
    assert_eq!(keys.address, "");

    let notes = scan_notes_by_address(garbage);
    assert!(notes.notes.is_empty());
    assert_eq!(notes.total_balance_nicks, 0);
}
