//! HTTP transport implementation for blockchain interactions.
//!
//! Sends JSON-RPC requests to a single endpoint through a retrying HTTP
//! client. Building the transport does not touch the network; the first
//! request establishes the connection.

use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, Jitter, RetryTransientMiddleware};
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::services::blockchain::{transports::BlockchainTransport, BlockChainError};

/// Configuration for HTTP retry policies
#[derive(Debug, Clone)]
pub struct HttpRetryConfig {
	/// Maximum number of retries for transient errors
	pub max_retries: u32,
	/// Base duration for exponential backoff calculations
	pub base_for_backoff: u32,
	/// Initial backoff duration before the first retry
	pub initial_backoff: Duration,
	/// Maximum backoff duration for retries
	pub max_backoff: Duration,
}

impl Default for HttpRetryConfig {
	fn default() -> Self {
		Self {
			max_retries: 2,
			base_for_backoff: 2,
			initial_backoff: Duration::from_millis(250),
			max_backoff: Duration::from_secs(5),
		}
	}
}

/// JSON-RPC over HTTP transport bound to one endpoint
#[derive(Clone, Debug)]
pub struct HttpTransportClient {
	client: ClientWithMiddleware,
	url: String,
}

impl HttpTransportClient {
	/// Creates a transport for `url` with the default retry policy
	///
	/// # Arguments
	/// * `url` - Endpoint URL, must be absolute http(s)
	/// * `timeout` - Timeout of each request attempt
	pub fn new(url: &str, timeout: Duration) -> Result<Self, BlockChainError> {
		Self::new_with_retry(url, timeout, &HttpRetryConfig::default())
	}

	pub fn new_with_retry(
		url: &str,
		timeout: Duration,
		retry: &HttpRetryConfig,
	) -> Result<Self, BlockChainError> {
		let parsed = Url::parse(url)
			.map_err(|e| BlockChainError::connection_error(format!("Invalid URL {}: {}", url, e)))?;
		if !matches!(parsed.scheme(), "http" | "https") {
			return Err(BlockChainError::connection_error(format!(
				"Unsupported URL scheme: {}",
				parsed.scheme()
			)));
		}

		let http_client = reqwest::ClientBuilder::new()
			.pool_idle_timeout(Duration::from_secs(90))
			.pool_max_idle_per_host(8)
			.timeout(timeout)
			.connect_timeout(timeout)
			.build()
			.map_err(|e| {
				BlockChainError::connection_error(format!("Failed to create HTTP client: {}", e))
			})?;

		let retry_policy = ExponentialBackoff::builder()
			.base(retry.base_for_backoff)
			.retry_bounds(retry.initial_backoff, retry.max_backoff)
			.jitter(Jitter::Full)
			.build_with_max_retries(retry.max_retries);

		let client = ClientBuilder::new(http_client)
			.with(RetryTransientMiddleware::new_with_policy(retry_policy))
			.build();

		Ok(Self {
			client,
			url: url.trim_end_matches('/').to_string(),
		})
	}
}

#[async_trait]
impl BlockchainTransport for HttpTransportClient {
	fn get_current_url(&self) -> &str {
		&self.url
	}

	/// Sends a JSON-RPC request to the endpoint
	///
	/// # Errors
	/// * `ConnectionError` - The endpoint could not be reached
	/// * `RequestError` - Non-success status, unparsable body or a JSON-RPC error object
	async fn send_raw_request(
		&self,
		method: &str,
		params: Option<Value>,
	) -> Result<Value, BlockChainError> {
		let body = self.customize_request(method, params);
		let response = self
			.client
			.post(self.url.as_str())
			.header("Content-Type", "application/json")
			.body(body.to_string())
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			let error_body = response.text().await.unwrap_or_default();
			return Err(BlockChainError::request_error(format!(
				"{} returned status {}: {}",
				self.url, status, error_body
			)));
		}

		let value: Value = response.json().await.map_err(|e| {
			BlockChainError::request_error(format!("Failed to parse JSON response: {}", e))
		})?;

		if let Some(error) = value.get("error").filter(|e| !e.is_null()) {
			return Err(BlockChainError::request_error(format!(
				"{} failed: {}",
				method, error
			)));
		}

		Ok(value)
	}
}
