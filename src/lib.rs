//! Web backend for the `nockchain-wallet` command-line tool.
//!
//! The CLI prints colorized, loosely formatted text that has drifted across
//! releases. This crate recovers typed records from that text (`scan`),
//! converts between the nick and NOCK units (`units`), caches per-address
//! note snapshots on disk (`cache`) and exposes the wallet operations over
//! an HTTP API (`api`).

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod gateway;
pub mod manager;
pub mod model;
pub mod scan;
pub mod units;

pub use manager::WalletManager;
