//! HTTP delivery surface over the wallet manager.
//!
//! Handlers hold no parsing logic: they validate caller input, call one
//! manager operation and shape the JSON response.

pub mod handlers;
pub mod server;
pub mod types;
