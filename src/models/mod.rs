//! Domain models and data structures for the chain registry.
//!
//! This module contains all the core data structures used throughout the application:
//!
//! - `blockchain`: Supported protocol families
//! - `config`: Configuration loading and validation
//! - `core`: Core domain models (Node, ChainConfig, RelayerId, statuses)

mod blockchain;
mod config;
mod core;

pub use blockchain::Network;

pub use core::{
	ChainConfig, ChainStatus, Node, NodeState, NodeStatus, RelayerId, DEFAULT_REQUEST_TIMEOUT_MS,
};

pub use config::{ConfigError, ConfigLoader};
