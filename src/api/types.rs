use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Address, ImportRecord, KeyMaterial, KeyVersion, Note};

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub connected: bool,
    pub active_address: String,
    pub addresses: Vec<Address>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateWalletResponse {
    pub success: bool,
    pub message: String,
    pub data: KeyMaterial,
}

#[derive(Debug, Deserialize)]
pub struct ImportWalletRequest {
    pub seed_phrase: Option<String>,
    pub key_file: Option<String>,
    /// 0 or 1; defaults to 1 for seed-phrase imports
    pub version: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct ImportWalletResponse {
    pub success: bool,
    pub message: String,
    pub address: String,
    pub version: Option<KeyVersion>,
    pub data: ImportRecord,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub success: bool,
    pub address: String,
    pub total_balance_nicks: u64,
    pub total_balance_nock: f64,
    pub captured_at: Option<DateTime<Utc>>,
    pub transactions: Vec<Note>,
}

#[derive(Debug, Deserialize)]
pub struct RefreshBalanceRequest {
    /// Defaults to the active master address
    pub address: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WalletsResponse {
    pub success: bool,
    pub active_address: String,
    pub wallets: Vec<Address>,
}

#[derive(Debug, Deserialize)]
pub struct SetActiveWalletRequest {
    pub address: String,
}

#[derive(Debug, Serialize)]
pub struct SetActiveWalletResponse {
    pub success: bool,
    pub message: String,
    pub address: String,
}

#[derive(Debug, Serialize)]
pub struct ActiveWalletResponse {
    pub success: bool,
    pub address: String,
    pub balance_nicks: u64,
    pub balance_nock: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SendTransactionRequest {
    pub sender: String,
    pub recipient: String,
    /// NOCK amount; accepted as a JSON number or a numeric string
    pub amount: serde_json::Value,
    /// NOCK fee, same shapes as `amount`; defaults to 0.00001
    pub fee: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct SendTransactionResponse {
    pub success: bool,
    pub message: String,
    pub tx_file: String,
    pub data: String,
}
