//! Core blockchain client interface and traits.
//!
//! The chain only needs two things from a protocol SDK: a way to build a
//! client for an endpoint URL, and a way to ask that endpoint which network
//! it serves.

use async_trait::async_trait;
use std::time::Duration;

use crate::services::blockchain::BlockChainError;

/// Defines the identity query every protocol client must support
#[async_trait]
pub trait RpcClient: Send + Sync + 'static {
	/// Queries the protocol-native identifier of the network served by the endpoint
	///
	/// # Returns
	/// * `Result<String, BlockChainError>` - The identifier, comparable to a configured chain id
	async fn chain_id(&self) -> Result<String, BlockChainError>;
}

/// Defines how clients for a protocol are constructed
///
/// `new_client` is called while the chain's client cache is locked, so it
/// must not perform network I/O. Connections are established lazily by the
/// first request.
pub trait ClientFactory: Send + Sync + 'static {
	type Client: RpcClient;

	/// Builds a client for the given endpoint
	///
	/// # Arguments
	/// * `url` - The endpoint URL
	/// * `timeout` - Timeout applied to every request issued by the client
	fn new_client(&self, url: &str, timeout: Duration) -> Result<Self::Client, BlockChainError>;
}
