//! EVM-compatible blockchain client implementation.
//!
//! The identity of an EVM endpoint is its `eth_chainId`, a hex quantity
//! which is reported in decimal to match configured chain ids.

use async_trait::async_trait;
use std::time::Duration;

use crate::services::blockchain::{
	transports::{extract_result, BlockchainTransport, HttpTransportClient},
	BlockChainError, ClientFactory, RpcClient,
};

/// Client implementation for Ethereum Virtual Machine (EVM) compatible blockchains
#[derive(Clone)]
pub struct EvmClient<T: Send + Sync + Clone> {
	/// The underlying transport client for RPC communication
	transport: T,
}

impl<T: Send + Sync + Clone> EvmClient<T> {
	/// Creates a new EVM client instance with a specific transport client
	pub fn new_with_transport(transport: T) -> Self {
		Self { transport }
	}
}

#[async_trait]
impl<T: Send + Sync + Clone + BlockchainTransport + 'static> RpcClient for EvmClient<T> {
	async fn chain_id(&self) -> Result<String, BlockChainError> {
		let response = self.transport.send_raw_request("eth_chainId", None).await?;
		let quantity = extract_result(&response)?
			.as_str()
			.ok_or_else(|| BlockChainError::request_error("eth_chainId result is not a string"))?;
		parse_hex_quantity(quantity)
	}
}

/// Converts a JSON-RPC hex quantity such as `0x89` to its decimal form
fn parse_hex_quantity(quantity: &str) -> Result<String, BlockChainError> {
	let digits = quantity
		.strip_prefix("0x")
		.or_else(|| quantity.strip_prefix("0X"))
		.ok_or_else(|| {
			BlockChainError::request_error(format!("Invalid hex quantity: {}", quantity))
		})?;
	u128::from_str_radix(digits, 16)
		.map(|value| value.to_string())
		.map_err(|e| BlockChainError::request_error(format!("Invalid hex quantity {}: {}", quantity, e)))
}

/// Builds [`EvmClient`]s over HTTP
#[derive(Debug, Clone, Default)]
pub struct EvmClientFactory;

impl ClientFactory for EvmClientFactory {
	type Client = EvmClient<HttpTransportClient>;

	fn new_client(&self, url: &str, timeout: Duration) -> Result<Self::Client, BlockChainError> {
		Ok(EvmClient::new_with_transport(HttpTransportClient::new(
			url, timeout,
		)?))
	}
}
