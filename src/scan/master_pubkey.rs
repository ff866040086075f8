//! Scanner for `show-master-pubkey` output.
//!
//! ```text
//! - Extended Public Key: zpub... (save for import)
//! - Corresponding Address: BLFp...
//! - Version: 1
//! ```

use super::sanitize;
use crate::model::{KeyVersion, MasterPubkeyRecord};

pub fn scan_master_pubkey(output: &str) -> MasterPubkeyRecord {
    let clean = sanitize(output);
    let mut result = MasterPubkeyRecord::default();

    for raw in clean.lines() {
        let line = raw.trim();

        if let Some(value) = line.strip_prefix("- Extended Public Key:") {
            let value = value.replace("(save for import)", "");
            let value = value.trim();
            if !value.is_empty() {
                result.extended_public_key = value.to_string();
            }
        } else if let Some(value) = line.strip_prefix("- Corresponding Address:") {
            let value = value.trim();
            if !value.is_empty() {
                result.address = value.to_string();
            }
        } else if let Some(value) = line.strip_prefix("- Version:") {
            let value = value.trim();
            if !value.is_empty() {
                result.version = KeyVersion::from_text(value);
            }
        }
    }

    result
}
