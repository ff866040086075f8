//! Conversion between nicks (the integer base unit) and NOCK (the display
//! unit). 65536 nicks = 1 NOCK.
//!
//! `nicks_to_nock` is the only place a floating-point value is derived;
//! balances are always aggregated over integer nicks first. The reverse
//! conversion truncates toward zero and is lossy in general, but is exact
//! for every integer below 2^53 because 65536 is a power of two: `n / 65536`
//! and the multiplication back are both exact in f64 on that range.

use crate::error::WalletError;

pub const NICKS_PER_NOCK: u64 = 65536;

pub fn nicks_to_nock(nicks: u64) -> f64 {
    nicks as f64 / NICKS_PER_NOCK as f64
}

/// Convert a NOCK amount to nicks, truncating toward zero.
///
/// Rejects negative and non-finite input instead of coercing it: this is
/// the validation boundary for user-entered transaction amounts.
pub fn nock_to_nicks(nock: f64) -> Result<u64, WalletError> {
    if !nock.is_finite() {
        return Err(WalletError::Validation(format!(
            "NOCK amount is not a finite number: {}",
            nock
        )));
    }
    if nock < 0.0 {
        return Err(WalletError::Validation(format!(
            "NOCK amount cannot be negative: {}",
            nock
        )));
    }
    Ok((nock * NICKS_PER_NOCK as f64).floor() as u64)
}

/// Parse a user-entered NOCK amount string into nicks.
pub fn parse_nock_amount(raw: &str) -> Result<u64, WalletError> {
    let trimmed = raw.trim();
    let nock: f64 = trimmed.parse().map_err(|_| {
        WalletError::Validation(format!("Invalid NOCK amount: '{}'", trimmed))
    })?;
    nock_to_nicks(nock)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_nock_is_65536_nicks() {
        assert_eq!(nicks_to_nock(65536), 1.0);
        assert_eq!(nock_to_nicks(1.0).unwrap(), 65536);
        assert_eq!(nock_to_nicks(1.5).unwrap(), 98304);
    }

    #[test]
    fn test_zero() {
        assert_eq!(nicks_to_nock(0), 0.0);
        assert_eq!(nock_to_nicks(0.0).unwrap(), 0);
    }

    #[test]
    fn test_round_trip_exact_up_to_boundary() {
        // Exactness is guaranteed while nicks fit in f64's 53-bit mantissa;
        // the documented boundary is 65536 * 10^6.
        let boundary: u64 = NICKS_PER_NOCK * 1_000_000;
        for n in [
            0u64,
            1,
            2,
            65535,
            65536,
            65537,
            98304,
            boundary - 1,
            boundary,
        ] {
            assert_eq!(nock_to_nicks(nicks_to_nock(n)).unwrap(), n, "n = {}", n);
        }
    }

    #[test]
    fn test_negative_rejected() {
        assert!(matches!(
            nock_to_nicks(-1.0),
            Err(WalletError::Validation(_))
        ));
        assert!(matches!(
            parse_nock_amount("-1"),
            Err(WalletError::Validation(_))
        ));
    }

    #[test]
    fn test_malformed_rejected() {
        assert!(matches!(
            parse_nock_amount("abc"),
            Err(WalletError::Validation(_))
        ));
        assert!(matches!(
            parse_nock_amount(""),
            Err(WalletError::Validation(_))
        ));
        assert!(matches!(
            parse_nock_amount("NaN"),
            Err(WalletError::Validation(_))
        ));
        assert!(matches!(
            parse_nock_amount("inf"),
            Err(WalletError::Validation(_))
        ));
    }

    #[test]
    fn test_truncates_toward_zero() {
        // 0.00001 NOCK = 0.65536 nicks, floors to 0
        assert_eq!(nock_to_nicks(0.00001).unwrap(), 0);
        assert_eq!(parse_nock_amount("0.5").unwrap(), 32768);
    }
}
