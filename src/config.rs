//! Backend configuration from environment variables.
//!
//! Controls which `nockchain-wallet` binary is invoked, how long a single
//! invocation may run, and where balance snapshots are cached.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct WalletConfig {
    /// Name or path of the external wallet binary
    pub wallet_bin: String,
    /// Hard timeout for one CLI invocation
    pub command_timeout: Duration,
    /// Directory holding per-address balance snapshot files
    pub cache_dir: PathBuf,
}

impl WalletConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `NOCKCHAIN_WALLET_BIN`: wallet binary (default "nockchain-wallet")
    /// - `WALLET_COMMAND_TIMEOUT_SECS`: per-command timeout (default 30)
    /// - `BALANCE_CACHE_DIR`: snapshot directory (default "./balance_cache")
    pub fn from_env() -> Self {
        let wallet_bin =
            env::var("NOCKCHAIN_WALLET_BIN").unwrap_or_else(|_| "nockchain-wallet".to_string());
        log::info!("Wallet binary: {}", wallet_bin);

        let timeout_secs = env::var("WALLET_COMMAND_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);
        log::info!("Command timeout: {}s", timeout_secs);

        let cache_dir = env::var("BALANCE_CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./balance_cache"));
        log::info!("Balance cache directory: {}", cache_dir.display());

        Self {
            wallet_bin,
            command_timeout: Duration::from_secs(timeout_secs),
            cache_dir,
        }
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            wallet_bin: "nockchain-wallet".to_string(),
            command_timeout: Duration::from_secs(30),
            cache_dir: PathBuf::from("./balance_cache"),
        }
    }
}
