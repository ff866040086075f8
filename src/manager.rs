//! Wallet Manager - Orchestration Layer
//!
//! Composes the command gateway, the record scanners and the balance cache
//! into the operations the API layer needs. Every operation is one gateway
//! call followed by one scan; balance queries go through the cache so a
//! page refresh does not force a fresh CLI invocation.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::cache::BalanceCache;
use crate::config::WalletConfig;
use crate::error::WalletError;
use crate::gateway::CommandGateway;
use crate::model::{
    ActiveAddressRecord, BalanceCacheEntry, BalanceSnapshot, ImportResult, KeyMaterial,
    KeyVersion, MasterAddressList, MasterPubkeyRecord, NoteList, SendTransactionOutcome,
    WalletStatus,
};
use crate::scan;

pub struct WalletManager {
    pub config: WalletConfig,
    gateway: CommandGateway,
    cache: BalanceCache,
    // One in-flight balance refresh per address; the cache's
    // delete-then-write step is not safe to race.
    refresh_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl WalletManager {
    pub fn new() -> Self {
        Self::with_config(WalletConfig::from_env())
    }

    /// Build a manager from an explicit configuration (tests point the
    /// cache at a temp directory and the binary at a stub).
    pub fn with_config(config: WalletConfig) -> Self {
        let gateway = CommandGateway::new(config.wallet_bin.clone(), config.command_timeout);
        let cache = BalanceCache::new(config.cache_dir.clone());
        Self {
            config,
            gateway,
            cache,
            refresh_locks: Mutex::new(HashMap::new()),
        }
    }

    // ============================================================================
    // Key material
    // ============================================================================

    pub async fn generate_keys(&self) -> Result<KeyMaterial, WalletError> {
        let output = self.gateway.run(&["keygen"]).await?;
        Ok(scan::scan_keygen(&output))
    }

    /// Import keys from a seed phrase or a key file. Exactly one of the two
    /// must be given; the version selector only applies to seed phrases and
    /// must be 0 or 1 (default 1).
    pub async fn import_keys(
        &self,
        seed_phrase: Option<&str>,
        key_file: Option<&str>,
        version: Option<u8>,
    ) -> Result<ImportResult, WalletError> {
        let seed_phrase = seed_phrase.map(str::trim).filter(|s| !s.is_empty());
        let key_file = key_file.map(str::trim).filter(|s| !s.is_empty());

        match (seed_phrase, key_file) {
            (Some(phrase), _) => {
                let version = KeyVersion::try_from(version.unwrap_or(1))?;
                let output = self
                    .gateway
                    .run(&[
                        "import-keys",
                        "--seedphrase",
                        phrase,
                        "--version",
                        &version.to_string(),
                    ])
                    .await?;
                let record = scan::scan_import(&output);
                Ok(ImportResult {
                    address: record.address.clone(),
                    version: record.version,
                    message: "Wallet imported successfully!".to_string(),
                    record,
                })
            }
            (None, Some(file)) => {
                let output = self.gateway.run(&["import-keys", "--file", file]).await?;
                let record = scan::scan_import(&output);
                let mut result = ImportResult {
                    address: record.address.clone(),
                    version: record.version,
                    message: "Wallet imported successfully!".to_string(),
                    record,
                };

                // Key-file imports are auto-activated by the CLI; the import
                // output itself often omits the address, so resolve it from
                // the active listing and fall back to the scan on failure.
                match self.list_active_address().await {
                    Ok(active) if !active.address.is_empty() => {
                        result.address = active.address;
                        result.version = active.version;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        log::warn!("Could not resolve active address after import: {}", e);
                    }
                }
                Ok(result)
            }
            (None, None) => Err(WalletError::Validation(
                "Either seed_phrase or key_file must be provided".to_string(),
            )),
        }
    }

    pub async fn show_master_pubkey(&self) -> Result<MasterPubkeyRecord, WalletError> {
        let output = self.gateway.run(&["show-master-pubkey"]).await?;
        Ok(scan::scan_master_pubkey(&output))
    }

    // ============================================================================
    // Addresses
    // ============================================================================

    pub async fn list_master_addresses(&self) -> Result<MasterAddressList, WalletError> {
        let output = self.gateway.run(&["list-master-addresses"]).await?;
        Ok(scan::scan_master_addresses(&output))
    }

    pub async fn list_active_address(&self) -> Result<ActiveAddressRecord, WalletError> {
        let output = self.gateway.run(&["list-active-addresses"]).await?;
        Ok(scan::scan_active_address(&output))
    }

    pub async fn set_active_address(&self, address: &str) -> Result<String, WalletError> {
        if address.trim().is_empty() {
            return Err(WalletError::Validation("Address is required".to_string()));
        }
        self.gateway
            .run(&["set-active-master-address", address])
            .await
    }

    /// Active master address, or empty when none is set or the tool is
    /// unreachable. Used where "no active wallet" is an answer, not an
    /// error.
    pub async fn get_active_master_address(&self) -> String {
        match self.list_master_addresses().await {
            Ok(listing) => listing.active_address,
            Err(e) => {
                log::warn!("Could not determine active master address: {}", e);
                String::new()
            }
        }
    }

    // ============================================================================
    // Notes & balances
    // ============================================================================

    pub async fn list_notes(&self) -> Result<NoteList, WalletError> {
        let output = self.gateway.run(&["list-notes"]).await?;
        Ok(scan::scan_notes(&output))
    }

    pub async fn list_notes_by_address(&self, address: &str) -> Result<NoteList, WalletError> {
        let output = self
            .gateway
            .run(&["list-notes-by-address", address])
            .await?;
        Ok(scan::scan_notes_by_address(&output))
    }

    pub async fn show_balance(&self) -> Result<BalanceSnapshot, WalletError> {
        let output = self.gateway.run(&["show-balance"]).await?;
        Ok(scan::scan_balance(&output))
    }

    /// Cached balance for an address. An empty cache triggers one
    /// fetch-then-cache attempt; a failed fetch degrades to the empty
    /// entry instead of erroring, since the cache is best-effort.
    pub async fn get_balance(&self, address: &str) -> BalanceCacheEntry {
        let entry = self.cache.read_snapshot(address);
        if entry.total_balance_nicks > 0 || !entry.notes.is_empty() {
            return entry;
        }

        if let Err(e) = self.fetch_and_cache(address).await {
            log::warn!("Balance fetch for {} failed: {}", address, e);
        }
        self.cache.read_snapshot(address)
    }

    /// Force a fresh note listing from the CLI and replace the cached
    /// snapshot. Gateway failures propagate.
    pub async fn refresh_balance(&self, address: &str) -> Result<BalanceCacheEntry, WalletError> {
        self.fetch_and_cache(address).await
    }

    async fn fetch_and_cache(&self, address: &str) -> Result<BalanceCacheEntry, WalletError> {
        let slot = {
            let mut locks = self.refresh_locks.lock().await;
            locks.entry(address.to_string()).or_default().clone()
        };

        let result = {
            let _guard = slot.lock().await;
            self.gateway
                .run(&["list-notes-by-address-csv", address])
                .await
                .map(|raw| self.cache.record_snapshot(address, &raw))
        };

        // Drop the slot once nothing else holds it; clones are only taken
        // under the map lock, so the count check cannot race a new waiter.
        let mut locks = self.refresh_locks.lock().await;
        if Arc::strong_count(&slot) == 2 {
            locks.remove(address);
        }

        result
    }

    // ============================================================================
    // Transactions
    // ============================================================================

    /// Two-step send: `create-tx` writes a transaction file, `send-tx`
    /// broadcasts it. Amounts are already validated nicks; address checks
    /// happen here, before any external invocation.
    pub async fn send_transaction(
        &self,
        sender: &str,
        recipient: &str,
        amount_nicks: u64,
        fee_nicks: u64,
    ) -> Result<SendTransactionOutcome, WalletError> {
        if sender.len() < 10 {
            return Err(WalletError::Validation(
                "Invalid sender address".to_string(),
            ));
        }
        if recipient.len() < 10 {
            return Err(WalletError::Validation(
                "Invalid recipient address".to_string(),
            ));
        }

        let tx_file = self
            .gateway
            .run(&[
                "create-tx",
                "--from",
                sender,
                "--to",
                recipient,
                "--amount",
                &amount_nicks.to_string(),
                "--fee",
                &fee_nicks.to_string(),
            ])
            .await?;
        let tx_file = tx_file.trim().to_string();

        let confirmation = self.gateway.run(&["send-tx", &tx_file]).await?;
        log::info!("Transaction sent ({} nicks to {})", amount_nicks, recipient);

        Ok(SendTransactionOutcome {
            tx_file,
            confirmation,
        })
    }

    // ============================================================================
    // Status
    // ============================================================================

    /// Aggregate status: connectivity is inferred from whether the address
    /// listing succeeds. Never errors; failure shows up as
    /// `connected: false` plus the error text.
    pub async fn get_status(&self) -> WalletStatus {
        match self.list_master_addresses().await {
            Ok(listing) => WalletStatus {
                connected: true,
                active_address: listing.active_address,
                addresses: listing.addresses,
                error: None,
            },
            Err(e) => WalletStatus {
                connected: false,
                active_address: String::new(),
                addresses: Vec::new(),
                error: Some(e.to_string()),
            },
        }
    }
}

impl Default for WalletManager {
    fn default() -> Self {
        Self::new()
    }
}
