//! Blockchain error types and handling.
//!
//! This module provides the error types for endpoint selection and identity
//! verification, plus the transport failures that surface through them.

use log::{error, warn};
use thiserror::Error;

/// Represents possible errors that can occur during blockchain operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BlockChainError {
	/// The chain has no configured nodes to select from
	#[error("No nodes available for chain {0}")]
	NoNodesAvailable(String),

	/// Errors related to network connectivity or client construction
	#[error("Connection error: {0}")]
	ConnectionError(String),

	/// The endpoint serves a different network than the chain expects
	#[error("Chain id mismatch for {endpoint}: expected {expected}, got {got}")]
	ChainIdMismatch {
		expected: String,
		got: String,
		endpoint: String,
	},

	/// No node reported the expected chain id and strict selection is enabled
	#[error("No node with a verified chain id available for chain {0}")]
	NoVerifiedNodeAvailable(String),

	/// Errors related to malformed requests or invalid responses
	#[error("Request error: {0}")]
	RequestError(String),

	/// Internal errors within the blockchain client
	#[error("Internal error: {0}")]
	InternalError(String),
}

impl BlockChainError {
	/// Creates a new no nodes available error with logging
	pub fn no_nodes_available(chain_id: impl Into<String>) -> Self {
		let error = Self::NoNodesAvailable(chain_id.into());
		error!("{}", error);
		error
	}

	/// Creates a new connection error with logging
	pub fn connection_error(msg: impl Into<String>) -> Self {
		let error = Self::ConnectionError(msg.into());
		error!("{}", error);
		error
	}

	/// Creates a new chain id mismatch error.
	///
	/// Mismatches are reported on every identity-sensitive call of a cached
	/// client, so they are logged at warn level only.
	pub fn chain_id_mismatch(
		expected: impl Into<String>,
		got: impl Into<String>,
		endpoint: impl Into<String>,
	) -> Self {
		let error = Self::ChainIdMismatch {
			expected: expected.into(),
			got: got.into(),
			endpoint: endpoint.into(),
		};
		warn!("{}", error);
		error
	}

	/// Creates a new no verified node available error with logging
	pub fn no_verified_node_available(chain_id: impl Into<String>) -> Self {
		let error = Self::NoVerifiedNodeAvailable(chain_id.into());
		error!("{}", error);
		error
	}

	/// Creates a new request error with logging
	pub fn request_error(msg: impl Into<String>) -> Self {
		let error = Self::RequestError(msg.into());
		error!("{}", error);
		error
	}

	/// Creates a new internal error with logging
	pub fn internal_error(msg: impl Into<String>) -> Self {
		let error = Self::InternalError(msg.into());
		error!("{}", error);
		error
	}
}

impl From<reqwest_middleware::Error> for BlockChainError {
	fn from(err: reqwest_middleware::Error) -> Self {
		Self::connection_error(err.to_string())
	}
}
