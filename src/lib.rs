//! Registry of relayers over EVM, Solana, Cosmos and Starknet chains.
//!
//! Each configured chain instance gets a relayer which selects a verified
//! RPC endpoint for its chain and reports chain and node statuses. The
//! registry aggregates them behind a single lookup and status interface.
//!
//! # Modules
//! - `bootstrap`: Registry construction and service lifecycle
//! - `models`: Domain models and configuration
//! - `services`: Blockchain clients, relayers and the registry
//! - `utils`: Logging

pub mod bootstrap;
pub mod models;
pub mod services;
pub mod utils;
