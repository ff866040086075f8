use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use super::handlers;
use crate::manager::WalletManager;

pub async fn start_server(addr: &str) -> anyhow::Result<()> {
    let manager = Arc::new(WalletManager::new());

    // Configure CORS based on environment
    // Set ALLOWED_ORIGINS="https://wallet.example.com" for production;
    // unset allows any origin (development mode)
    let cors = match std::env::var("ALLOWED_ORIGINS") {
        Ok(origins) if !origins.is_empty() => {
            log::info!("CORS configured for origins: {}", origins);
            let origin_list: Vec<_> = origins
                .split(',')
                .map(|s| s.trim().parse().expect("Invalid CORS origin"))
                .collect();
            CorsLayer::new()
                .allow_origin(origin_list)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        _ => {
            log::warn!("CORS: Allowing all origins (development mode). Set ALLOWED_ORIGINS env var for production.");
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    let app = Router::new()
        .route("/api/status", get(handlers::status_handler))
        .route("/api/create-wallet", post(handlers::create_wallet_handler))
        .route("/api/import-wallet", post(handlers::import_wallet_handler))
        .route("/api/master-pubkey", get(handlers::master_pubkey_handler))
        .route("/api/wallets", get(handlers::wallets_handler))
        .route(
            "/api/set-active-wallet",
            post(handlers::set_active_wallet_handler),
        )
        .route("/api/active-wallet", get(handlers::active_wallet_handler))
        .route("/api/addresses", get(handlers::addresses_handler))
        .route("/api/notes", get(handlers::notes_handler))
        .route(
            "/api/notes/:address",
            get(handlers::notes_by_address_handler),
        )
        .route("/api/balance/:address", get(handlers::balance_handler))
        .route(
            "/api/refresh-balance",
            post(handlers::refresh_balance_handler),
        )
        .route(
            "/api/send-transaction",
            post(handlers::send_transaction_handler),
        )
        .layer(cors)
        .with_state(manager);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Handle graceful shutdown signals (Ctrl+C, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            log::info!("Received SIGTERM signal");
        },
    }

    log::info!("Shutdown signal received, exiting gracefully...");
}
