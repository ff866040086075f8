use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Error taxonomy for the wallet backend.
///
/// Parsing never produces an error: scanners degrade to zero-value fields
/// and the caller decides what an empty result means. Cache IO is logged
/// and absorbed, never surfaced. The variants here cover the two hard
/// failure sources (the external tool and caller input) plus a catch-all
/// for failures the gateway cannot classify.
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Wallet command failed: {0}")]
    Gateway(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for WalletError {
    fn into_response(self) -> Response {
        let status = match self {
            WalletError::Validation(_) => StatusCode::BAD_REQUEST,
            WalletError::Gateway(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
