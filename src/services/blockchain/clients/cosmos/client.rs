//! Cosmos client implementation.
//!
//! Tendermint nodes report the chain id as `node_info.network` of the
//! `status` endpoint.

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

use crate::services::blockchain::{
	transports::{extract_result, BlockchainTransport, HttpTransportClient},
	BlockChainError, ClientFactory, RpcClient,
};

/// Client implementation for Cosmos SDK chains
#[derive(Clone)]
pub struct CosmosClient<T: Send + Sync + Clone> {
	transport: T,
}

impl<T: Send + Sync + Clone> CosmosClient<T> {
	/// Creates a new Cosmos client instance with a specific transport client
	pub fn new_with_transport(transport: T) -> Self {
		Self { transport }
	}
}

#[async_trait]
impl<T: Send + Sync + Clone + BlockchainTransport + 'static> RpcClient for CosmosClient<T> {
	async fn chain_id(&self) -> Result<String, BlockChainError> {
		let response = self
			.transport
			.send_raw_request("status", Some(json!({})))
			.await?;
		extract_result(&response)?
			.pointer("/node_info/network")
			.and_then(|network| network.as_str())
			.map(str::to_string)
			.ok_or_else(|| BlockChainError::request_error("Missing node_info.network in status"))
	}
}

/// Builds [`CosmosClient`]s over HTTP
#[derive(Debug, Clone, Default)]
pub struct CosmosClientFactory;

impl ClientFactory for CosmosClientFactory {
	type Client = CosmosClient<HttpTransportClient>;

	fn new_client(&self, url: &str, timeout: Duration) -> Result<Self::Client, BlockChainError> {
		Ok(CosmosClient::new_with_transport(HttpTransportClient::new(
			url, timeout,
		)?))
	}
}
