//! Network transport implementations for blockchain clients.
//!
//! Every supported protocol exposes its identity query over JSON-RPC on
//! HTTP, so a single transport serves all clients.

mod http;

pub use http::{HttpRetryConfig, HttpTransportClient};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::services::blockchain::BlockChainError;

/// Base trait for all blockchain transport clients
#[async_trait]
pub trait BlockchainTransport: Send + Sync {
	/// Get the URL this transport sends requests to
	fn get_current_url(&self) -> &str;

	/// Send a raw JSON-RPC request and return the full response document
	async fn send_raw_request(
		&self,
		method: &str,
		params: Option<Value>,
	) -> Result<Value, BlockChainError>;

	/// Builds the request body for a JSON-RPC call
	fn customize_request(&self, method: &str, params: Option<Value>) -> Value {
		json!({
			"jsonrpc": "2.0",
			"id": 1,
			"method": method,
			"params": params.unwrap_or_else(|| json!([]))
		})
	}
}

/// Extracts the `result` member of a JSON-RPC response
pub fn extract_result(response: &Value) -> Result<&Value, BlockChainError> {
	response
		.get("result")
		.ok_or_else(|| BlockChainError::request_error("Missing 'result' field"))
}
