use mockito::{Matcher, Server};
use serde_json::json;
use std::time::Duration;

use openzeppelin_chain_registry::{
	models::{Network, Node},
	services::blockchain::{
		BlockChainError, Chain, ClientFactory, EvmClient, EvmClientFactory, HttpRetryConfig,
		HttpTransportClient, RpcClient,
	},
};

use crate::integration::mocks::chain_config;

#[tokio::test]
async fn test_chain_id_is_decimal() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("POST", "/")
		.match_body(Matcher::PartialJson(json!({"method": "eth_chainId"})))
		.with_header("content-type", "application/json")
		.with_body(r#"{"jsonrpc":"2.0","id":1,"result":"0x89"}"#)
		.create_async()
		.await;

	let client = EvmClientFactory
		.new_client(&server.url(), Duration::from_secs(5))
		.unwrap();
	assert_eq!(client.chain_id().await.unwrap(), "137");
	mock.assert_async().await;
}

#[tokio::test]
async fn test_chain_id_rpc_error() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("POST", "/")
		.with_body(r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"Method not found"}}"#)
		.create_async()
		.await;

	let client = EvmClientFactory
		.new_client(&server.url(), Duration::from_secs(5))
		.unwrap();
	assert!(matches!(
		client.chain_id().await,
		Err(BlockChainError::RequestError(_))
	));
	mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_status() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("POST", "/")
		.with_status(503)
		.with_body("unavailable")
		.expect(1)
		.create_async()
		.await;

	let retry = HttpRetryConfig {
		max_retries: 0,
		..Default::default()
	};
	let transport =
		HttpTransportClient::new_with_retry(&server.url(), Duration::from_secs(5), &retry).unwrap();
	let client = EvmClient::new_with_transport(transport);
	let err = client.chain_id().await.unwrap_err();
	assert!(err.to_string().contains("503"));
	mock.assert_async().await;
}

#[test]
fn test_invalid_url_is_rejected_without_network() {
	assert!(EvmClientFactory
		.new_client("ws://localhost:8546", Duration::from_secs(5))
		.is_err());
	assert!(EvmClientFactory
		.new_client("not a url", Duration::from_secs(5))
		.is_err());
}

#[tokio::test]
async fn test_chain_selects_matching_endpoint() {
	let mut mainnet = Server::new_async().await;
	let mut polygon = Server::new_async().await;
	mainnet
		.mock("POST", "/")
		.with_body(r#"{"jsonrpc":"2.0","id":1,"result":"0x1"}"#)
		.create_async()
		.await;
	polygon
		.mock("POST", "/")
		.with_body(r#"{"jsonrpc":"2.0","id":1,"result":"0x89"}"#)
		.create_async()
		.await;

	let chain = Chain::new(
		chain_config(
			Network::EVM,
			"137",
			vec![
				Node::new("mainnet", mainnet.url()),
				Node::new("polygon", polygon.url()),
			],
		),
		EvmClientFactory,
	);
	let client = chain.get_client().await.unwrap();
	assert_eq!(client.endpoint(), polygon.url().trim_end_matches('/'));
	assert_eq!(client.chain_id().unwrap(), "137");
}
