//! Domain records recovered from `nockchain-wallet` output.
//!
//! Every field defaults to its zero value; a scanner that cannot find a
//! field leaves it there instead of failing. Callers treat an all-default
//! record as "format not recognised", not as an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WalletError;
use crate::units::nicks_to_nock;

/// Key/address format version. The CLI only knows versions 0 and 1;
/// anything else from a caller is rejected at this boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum KeyVersion {
    V0,
    V1,
}

impl KeyVersion {
    /// Recognise a version from scanned text. Returns `None` for anything
    /// that is not exactly "0" or "1" so the scanner can fall back to its
    /// own default.
    pub fn from_text(text: &str) -> Option<Self> {
        match text.trim().split_whitespace().next()? {
            "0" => Some(KeyVersion::V0),
            "1" => Some(KeyVersion::V1),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            KeyVersion::V0 => 0,
            KeyVersion::V1 => 1,
        }
    }
}

impl Default for KeyVersion {
    fn default() -> Self {
        KeyVersion::V1
    }
}

impl From<KeyVersion> for u8 {
    fn from(v: KeyVersion) -> u8 {
        v.as_u8()
    }
}

impl TryFrom<u8> for KeyVersion {
    type Error = WalletError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(KeyVersion::V0),
            1 => Ok(KeyVersion::V1),
            other => Err(WalletError::Validation(format!(
                "Invalid version '{}'. Version must be 0 or 1.",
                other
            ))),
        }
    }
}

impl std::fmt::Display for KeyVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// A master address from a listing. At most one address in a listing is
/// marked active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "address")]
    pub value: String,
    pub version: KeyVersion,
    pub is_active: bool,
}

/// Key material produced by `keygen` (all fields) or an import
/// (address + version only). Never persisted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct KeyMaterial {
    pub address: String,
    pub extended_private_key: String,
    pub extended_public_key: String,
    pub seed_phrase: String,
    pub version: Option<KeyVersion>,
    /// Sanitized CLI output, kept for audit
    pub raw_output: String,
}

/// Result of scanning `import-keys` output.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportRecord {
    pub address: String,
    pub version: Option<KeyVersion>,
    pub raw_output: String,
}

/// Import outcome after the façade has resolved the effective address
/// (key-file imports are auto-activated by the CLI, so the active address
/// is looked up afterwards).
#[derive(Debug, Clone, Serialize)]
pub struct ImportResult {
    pub address: String,
    pub version: Option<KeyVersion>,
    pub message: String,
    pub record: ImportRecord,
}

/// Result of scanning `show-master-pubkey` output.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MasterPubkeyRecord {
    pub address: String,
    pub extended_public_key: String,
    pub version: Option<KeyVersion>,
}

/// Result of scanning `list-master-addresses` output.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MasterAddressList {
    pub active_address: String,
    pub addresses: Vec<Address>,
}

/// Result of scanning `list-active-addresses` output. Only the Signing
/// section yields an address; the Watch-only section is recognised but
/// not extracted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ActiveAddressRecord {
    pub address: String,
    pub version: Option<KeyVersion>,
    pub kind: String,
    pub raw_output: String,
}

/// A discrete spendable value record. A note is complete once its `source`
/// has been observed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub name: String,
    pub version: KeyVersion,
    pub assets_nicks: u64,
    /// Numeric text; may be fractional, so it stays a string
    pub block_height: String,
    pub source: String,
}

/// An ordered note listing with totals aggregated over integer nicks.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NoteList {
    pub notes: Vec<Note>,
    pub total_balance_nicks: u64,
    pub total_balance_nock: f64,
}

impl NoteList {
    pub fn from_notes(notes: Vec<Note>) -> Self {
        let total: u64 = notes.iter().map(|n| n.assets_nicks).sum();
        Self {
            total_balance_nicks: total,
            total_balance_nock: nicks_to_nock(total),
            notes,
        }
    }
}

/// Result of scanning `show-balance` output. Either fully populated from
/// one scan or left at all-zero defaults.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BalanceSnapshot {
    pub balance_nicks: u64,
    pub balance_nock: f64,
    pub block_height: String,
    pub block_hash: String,
    pub num_notes: u64,
    pub version: String,
}

/// One cached note snapshot for an address. `captured_at` is `None` for
/// the empty default returned when no snapshot exists.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BalanceCacheEntry {
    pub address: String,
    pub captured_at: Option<DateTime<Utc>>,
    pub notes: Vec<Note>,
    pub total_balance_nicks: u64,
    pub total_balance_nock: f64,
}

impl BalanceCacheEntry {
    pub fn empty(address: &str) -> Self {
        Self {
            address: address.to_string(),
            ..Default::default()
        }
    }
}

/// Aggregate wallet/node status. Recomputed on every request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WalletStatus {
    pub connected: bool,
    pub active_address: String,
    pub addresses: Vec<Address>,
    pub error: Option<String>,
}

/// Outcome of the two-step create-tx / send-tx flow.
#[derive(Debug, Clone, Serialize)]
pub struct SendTransactionOutcome {
    pub tx_file: String,
    pub confirmation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_from_text() {
        assert_eq!(KeyVersion::from_text("0"), Some(KeyVersion::V0));
        assert_eq!(KeyVersion::from_text(" 1 "), Some(KeyVersion::V1));
        assert_eq!(KeyVersion::from_text("1 (current)"), Some(KeyVersion::V1));
        assert_eq!(KeyVersion::from_text("2"), None);
        assert_eq!(KeyVersion::from_text(""), None);
    }

    #[test]
    fn test_version_try_from_rejects_out_of_range() {
        assert!(KeyVersion::try_from(0).is_ok());
        assert!(KeyVersion::try_from(1).is_ok());
        assert!(KeyVersion::try_from(2).is_err());
    }

    #[test]
    fn test_note_list_totals() {
        let note = |nicks: u64| Note {
            name: "n".to_string(),
            version: KeyVersion::V1,
            assets_nicks: nicks,
            block_height: "1".to_string(),
            source: "s".to_string(),
        };
        let list = NoteList::from_notes(vec![note(65536), note(32768), note(0)]);
        assert_eq!(list.total_balance_nicks, 98304);
        assert_eq!(list.total_balance_nock, 1.5);
    }
}
