//! Starknet client implementation.
//!
//! `starknet_chainId` returns a felt holding a short ASCII string such as
//! `SN_MAIN`, which is used as the chain id.

use async_trait::async_trait;
use std::time::Duration;

use crate::services::blockchain::{
	transports::{extract_result, BlockchainTransport, HttpTransportClient},
	BlockChainError, ClientFactory, RpcClient,
};

/// Decodes a hex felt holding a short string.
///
/// Values that are not printable ASCII are returned unchanged.
pub fn decode_short_string(felt: &str) -> String {
	let digits = felt.trim_start_matches("0x");
	let padded = if digits.len() % 2 == 1 {
		format!("0{}", digits)
	} else {
		digits.to_string()
	};

	match hex::decode(&padded) {
		Ok(bytes) => {
			let bytes: Vec<u8> = bytes.into_iter().skip_while(|b| *b == 0).collect();
			if !bytes.is_empty() && bytes.iter().all(|b| b.is_ascii_graphic()) {
				String::from_utf8_lossy(&bytes).into_owned()
			} else {
				felt.to_string()
			}
		}
		Err(_) => felt.to_string(),
	}
}

/// Client implementation for Starknet networks
#[derive(Clone)]
pub struct StarknetClient<T: Send + Sync + Clone> {
	transport: T,
}

impl<T: Send + Sync + Clone> StarknetClient<T> {
	/// Creates a new Starknet client instance with a specific transport client
	pub fn new_with_transport(transport: T) -> Self {
		Self { transport }
	}
}

#[async_trait]
impl<T: Send + Sync + Clone + BlockchainTransport + 'static> RpcClient for StarknetClient<T> {
	async fn chain_id(&self) -> Result<String, BlockChainError> {
		let response = self
			.transport
			.send_raw_request("starknet_chainId", None)
			.await?;
		let felt = extract_result(&response)?.as_str().ok_or_else(|| {
			BlockChainError::request_error("starknet_chainId result is not a string")
		})?;
		Ok(decode_short_string(felt))
	}
}

/// Builds [`StarknetClient`]s over HTTP
#[derive(Debug, Clone, Default)]
pub struct StarknetClientFactory;

impl ClientFactory for StarknetClientFactory {
	type Client = StarknetClient<HttpTransportClient>;

	fn new_client(&self, url: &str, timeout: Duration) -> Result<Self::Client, BlockChainError> {
		Ok(StarknetClient::new_with_transport(HttpTransportClient::new(
			url, timeout,
		)?))
	}
}
