//! Scanner for `import-keys` output.
//!
//! Recent CLI versions print:
//!
//! ```text
//! Master Key (Imported)
//! - Address: <ADDRESS>
//! - Version: <VERSION>
//! ```

use super::sanitize;
use crate::model::{ImportRecord, KeyVersion};

pub fn scan_import(output: &str) -> ImportRecord {
    let clean = sanitize(output);
    let mut result = ImportRecord {
        raw_output: clean.clone(),
        ..Default::default()
    };

    for raw in clean.lines() {
        let line = raw.trim();

        if line.is_empty() || line.starts_with("I ") || line.starts_with('[') {
            continue;
        }
        if line.contains("Master Key") {
            continue;
        }

        if let Some(value) = line.strip_prefix("- Address:") {
            let value = value.trim();
            if !value.is_empty() {
                result.address = value.to_string();
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_import() {
        let output = "\
I wallet: importing
Master Key (Imported)
- Address: BLFpimported00000000000000000000
- Version: 0
";
        let result = scan_import(output);
        assert_eq!(result.address, "BLFpimported00000000000000000000");
        assert_eq!(result.version, Some(KeyVersion::V0));
    }

    #[test]
    fn test_scan_import_missing_fields_stay_default() {
        let result = scan_import("Master Key (Imported)\n- Address:\n");
        assert_eq!(result.address, "");
        assert_eq!(result.version, None);
    }
}
