//! Scanner for `show-balance` output.
//!
//! ```text
//! Balance successfully retrieved from block 0x1a2b3c at height 38.999
//! - Wallet Version: 1.0.2
//! - Number of Notes: 3
//! - Balance: 196608 nicks (3 NOCK)
//! ```
//!
//! The snapshot is either fully populated from one scan or stays at its
//! all-zero defaults.

use once_cell::sync::Lazy;
use regex::Regex;

use super::sanitize;
use crate::model::BalanceSnapshot;
use crate::units::nicks_to_nock;

static HEIGHT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"at height\s+([\d.]+)").expect("valid regex"));

static BLOCK_HASH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"from block\s+(\S+)\s+at").expect("valid regex"));

static NICKS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s+nicks").expect("valid regex"));

static COUNT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid regex"));

pub fn scan_balance(output: &str) -> BalanceSnapshot {
    let clean = sanitize(output);
    let mut snapshot = BalanceSnapshot::default();

    for raw in clean.lines() {
        let line = raw.trim();

        if line.contains("at height") {
            if let Some(cap) = HEIGHT_RE.captures(line) {
                snapshot.block_height = cap[1].to_string();
            }
            if let Some(cap) = BLOCK_HASH_RE.captures(line) {
                snapshot.block_hash = cap[1].to_string();
            }
        } else if line.contains("Wallet Version:") {
            snapshot.version = line.replace("- Wallet Version:", "").trim().to_string();
        } else if line.contains("Number of Notes:") {
            if let Some(m) = COUNT_RE.find(line) {
                if let Ok(count) = m.as_str().parse() {
                    snapshot.num_notes = count;
                }
            }
        } else if line.contains("Balance:") {
            if let Some(cap) = NICKS_RE.captures(line) {
                if let Ok(nicks) = cap[1].parse::<u64>() {
                    snapshot.balance_nicks = nicks;
                    snapshot.balance_nock = nicks_to_nock(nicks);
                }
            }
        }
    }

    snapshot
}
