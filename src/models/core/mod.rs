//! Core domain models for the chain registry.
//!
//! This module contains the fundamental data structures that represent:
//! - Nodes: RPC endpoints of a chain
//! - Chain configurations: one configured instance of a protocol family
//! - Relayer ids: the registry key of every relayer
//! - Statuses: chain and node status reports

mod chain;
mod node;
mod relayer_id;
mod status;

pub use chain::{ChainConfig, DEFAULT_REQUEST_TIMEOUT_MS};
pub use node::Node;
pub use relayer_id::RelayerId;
pub use status::{ChainStatus, NodeState, NodeStatus};
