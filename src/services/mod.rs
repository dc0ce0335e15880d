//! Core services of the chain registry.
//!
//! - `blockchain`: Endpoint clients, transports and verified client selection
//! - `relayer`: Relayers over single chains and their factory
//! - `registry`: The registry aggregating every relayer

pub mod blockchain;
pub mod registry;
pub mod relayer;
