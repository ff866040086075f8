use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::error::WalletError;
use crate::manager::WalletManager;
use crate::model::{ActiveAddressRecord, KeyVersion, MasterPubkeyRecord, NoteList};
use crate::units::{nock_to_nicks, parse_nock_amount};

use super::types::*;

pub async fn status_handler(State(manager): State<Arc<WalletManager>>) -> Json<StatusResponse> {
    let status = manager.get_status().await;
    Json(StatusResponse {
        success: true,
        connected: status.connected,
        active_address: status.active_address,
        addresses: status.addresses,
        error: status.error,
    })
}

pub async fn create_wallet_handler(
    State(manager): State<Arc<WalletManager>>,
) -> Result<Json<CreateWalletResponse>, WalletError> {
    let key_material = manager.generate_keys().await?;
    Ok(Json(CreateWalletResponse {
        success: true,
        message: "New wallet created!".to_string(),
        data: key_material,
    }))
}

pub async fn import_wallet_handler(
    State(manager): State<Arc<WalletManager>>,
    Json(req): Json<ImportWalletRequest>,
) -> Result<Json<ImportWalletResponse>, WalletError> {
    let result = manager
        .import_keys(req.seed_phrase.as_deref(), req.key_file.as_deref(), req.version)
        .await?;
    Ok(Json(ImportWalletResponse {
        success: true,
        message: result.message,
        address: result.address,
        version: result.version,
        data: result.record,
    }))
}

pub async fn master_pubkey_handler(
    State(manager): State<Arc<WalletManager>>,
) -> Result<Json<MasterPubkeyRecord>, WalletError> {
    let record = manager.show_master_pubkey().await?;
    Ok(Json(record))
}

pub async fn balance_handler(
    State(manager): State<Arc<WalletManager>>,
    Path(address): Path<String>,
) -> Json<BalanceResponse> {
    let entry = manager.get_balance(&address).await;
    Json(BalanceResponse {
        success: true,
        address: entry.address,
        total_balance_nicks: entry.total_balance_nicks,
        total_balance_nock: entry.total_balance_nock,
        captured_at: entry.captured_at,
        transactions: entry.notes,
    })
}

/// The request body is optional; a body-less POST refreshes the active
/// master address.
pub async fn refresh_balance_handler(
    State(manager): State<Arc<WalletManager>>,
    req: Option<Json<RefreshBalanceRequest>>,
) -> Result<Json<BalanceResponse>, WalletError> {
    let requested = req
        .and_then(|Json(r)| r.address)
        .filter(|a| !a.trim().is_empty());
    let address = match requested {
        Some(address) => address,
        None => {
            let active = manager.get_active_master_address().await;
            if active.is_empty() {
                return Err(WalletError::Validation(
                    "No active wallet found to refresh balance.".to_string(),
                ));
            }
            active
        }
    };

    let entry = manager.refresh_balance(&address).await?;
    Ok(Json(BalanceResponse {
        success: true,
        address: entry.address,
        total_balance_nicks: entry.total_balance_nicks,
        total_balance_nock: entry.total_balance_nock,
        captured_at: entry.captured_at,
        transactions: entry.notes,
    }))
}

pub async fn wallets_handler(
    State(manager): State<Arc<WalletManager>>,
) -> Result<Json<WalletsResponse>, WalletError> {
    let listing = manager.list_master_addresses().await?;
    Ok(Json(WalletsResponse {
        success: true,
        active_address: listing.active_address,
        wallets: listing.addresses,
    }))
}

pub async fn set_active_wallet_handler(
    State(manager): State<Arc<WalletManager>>,
    Json(req): Json<SetActiveWalletRequest>,
) -> Result<Json<SetActiveWalletResponse>, WalletError> {
    manager.set_active_address(&req.address).await?;
    Ok(Json(SetActiveWalletResponse {
        success: true,
        message: "Active wallet updated successfully!".to_string(),
        address: req.address,
    }))
}

/// Active wallet with its cached balance. Balance queries only work for
/// version-0 addresses; a v1 active address gets zeros plus a warning
/// instead of a misleading lookup.
pub async fn active_wallet_handler(
    State(manager): State<Arc<WalletManager>>,
) -> Result<Json<ActiveWalletResponse>, WalletError> {
    let listing = manager.list_master_addresses().await?;
    if listing.active_address.is_empty() {
        return Err(WalletError::Validation(
            "No active wallet found".to_string(),
        ));
    }

    let version = listing
        .addresses
        .iter()
        .find(|a| a.value == listing.active_address)
        .map(|a| a.version)
        .unwrap_or(KeyVersion::V1);

    if version == KeyVersion::V1 {
        return Ok(Json(ActiveWalletResponse {
            success: true,
            address: listing.active_address,
            balance_nicks: 0,
            balance_nock: 0.0,
            warning: Some(
                "Balance queries only work for v0 addresses. This is a v1 address.".to_string(),
            ),
        }));
    }

    let entry = manager.get_balance(&listing.active_address).await;
    Ok(Json(ActiveWalletResponse {
        success: true,
        address: listing.active_address,
        balance_nicks: entry.total_balance_nicks,
        balance_nock: entry.total_balance_nock,
        warning: None,
    }))
}

pub async fn addresses_handler(
    State(manager): State<Arc<WalletManager>>,
) -> Result<Json<ActiveAddressRecord>, WalletError> {
    let record = manager.list_active_address().await?;
    Ok(Json(record))
}

pub async fn notes_handler(
    State(manager): State<Arc<WalletManager>>,
) -> Result<Json<NoteList>, WalletError> {
    let notes = manager.list_notes().await?;
    Ok(Json(notes))
}

pub async fn notes_by_address_handler(
    State(manager): State<Arc<WalletManager>>,
    Path(address): Path<String>,
) -> Result<Json<NoteList>, WalletError> {
    let notes = manager.list_notes_by_address(&address).await?;
    Ok(Json(notes))
}

pub async fn send_transaction_handler(
    State(manager): State<Arc<WalletManager>>,
    Json(req): Json<SendTransactionRequest>,
) -> Result<Json<SendTransactionResponse>, WalletError> {
    let amount_nicks = nock_value_to_nicks(&req.amount)?;
    let fee_nicks = match &req.fee {
        Some(fee) => nock_value_to_nicks(fee)?,
        None => nock_to_nicks(0.00001)?,
    };

    let outcome = manager
        .send_transaction(&req.sender, &req.recipient, amount_nicks, fee_nicks)
        .await?;

    Ok(Json(SendTransactionResponse {
        success: true,
        message: "Transaction sent successfully!".to_string(),
        tx_file: outcome.tx_file,
        data: outcome.confirmation,
    }))
}

/// Accept a NOCK amount as a JSON number or numeric string; anything else
/// is rejected before the manager is touched.
fn nock_value_to_nicks(value: &serde_json::Value) -> Result<u64, WalletError> {
    match value {
        serde_json::Value::Number(n) => {
            let nock = n.as_f64().ok_or_else(|| {
                WalletError::Validation(format!("Invalid NOCK amount: {}", n))
            })?;
            nock_to_nicks(nock)
        }
        serde_json::Value::String(s) => parse_nock_amount(s),
        other => Err(WalletError::Validation(format!(
            "Invalid NOCK amount: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WalletConfig;
    use serde_json::json;
    use std::time::Duration;

    // A POST without a body must reach the active-address fallback, not be
    // rejected by body extraction.
    #[tokio::test]
    async fn test_refresh_without_body_falls_back_to_active_address() {
        let dir = tempfile::tempdir().unwrap();
        let manager = Arc::new(WalletManager::with_config(WalletConfig {
            wallet_bin: "nockwallet-test-binary-that-does-not-exist".to_string(),
            command_timeout: Duration::from_secs(1),
            cache_dir: dir.path().to_path_buf(),
        }));

        // No active address resolvable, so the fallback reports the
        // validation error rather than a deserialization failure.
        let err = refresh_balance_handler(State(manager), None)
            .await
            .unwrap_err();
        match err {
            WalletError::Validation(msg) => assert!(msg.contains("No active wallet")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_nock_value_accepts_number_and_string() {
        assert_eq!(nock_value_to_nicks(&json!(1.5)).unwrap(), 98304);
        assert_eq!(nock_value_to_nicks(&json!("1.5")).unwrap(), 98304);
    }

    #[test]
    fn test_nock_value_rejects_garbage() {
        assert!(nock_value_to_nicks(&json!("abc")).is_err());
        assert!(nock_value_to_nicks(&json!(-1)).is_err());
        assert!(nock_value_to_nicks(&json!(null)).is_err());
        assert!(nock_value_to_nicks(&json!({"amount": 1})).is_err());
    }
}
