//! Solana client implementation.
//!
//! Solana endpoints do not report a cluster name. The identity of an
//! endpoint is derived from its genesis hash.

use async_trait::async_trait;
use std::time::Duration;

use crate::services::blockchain::{
	transports::{extract_result, BlockchainTransport, HttpTransportClient},
	BlockChainError, ClientFactory, RpcClient,
};

const MAINNET_GENESIS_HASH: &str = "5eykt4UsFv8P8NJdTREpY1vzqKqZKvdpKuc147dw2N9d";
const TESTNET_GENESIS_HASH: &str = "4uhcVJyU9pJkvQyS88uRDiswHXSCkY3zQawwpjk2NsNY";
const DEVNET_GENESIS_HASH: &str = "EtWTRABZaYq6iMfeYKouRu166VU2xqa1wcaWoxPkrZBG";

/// Maps a genesis hash to the cluster name used as chain id.
///
/// Any unknown hash belongs to a local or private cluster.
pub fn cluster_for_genesis_hash(hash: &str) -> &'static str {
	match hash {
		MAINNET_GENESIS_HASH => "mainnet",
		TESTNET_GENESIS_HASH => "testnet",
		DEVNET_GENESIS_HASH => "devnet",
		_ => "localnet",
	}
}

/// Client implementation for Solana clusters
#[derive(Clone)]
pub struct SolanaClient<T: Send + Sync + Clone> {
	transport: T,
}

impl<T: Send + Sync + Clone> SolanaClient<T> {
	/// Creates a new Solana client instance with a specific transport client
	pub fn new_with_transport(transport: T) -> Self {
		Self { transport }
	}
}

#[async_trait]
impl<T: Send + Sync + Clone + BlockchainTransport + 'static> RpcClient for SolanaClient<T> {
	async fn chain_id(&self) -> Result<String, BlockChainError> {
		let response = self
			.transport
			.send_raw_request("getGenesisHash", None)
			.await?;
		let hash = extract_result(&response)?.as_str().ok_or_else(|| {
			BlockChainError::request_error("getGenesisHash result is not a string")
		})?;
		Ok(cluster_for_genesis_hash(hash).to_string())
	}
}

/// Builds [`SolanaClient`]s over HTTP
#[derive(Debug, Clone, Default)]
pub struct SolanaClientFactory;

impl ClientFactory for SolanaClientFactory {
	type Client = SolanaClient<HttpTransportClient>;

	fn new_client(&self, url: &str, timeout: Duration) -> Result<Self::Client, BlockChainError> {
		Ok(SolanaClient::new_with_transport(HttpTransportClient::new(
			url, timeout,
		)?))
	}
}
