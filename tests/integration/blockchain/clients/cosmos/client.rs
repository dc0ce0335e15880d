use mockito::{Matcher, Server};
use serde_json::json;
use std::time::Duration;

use openzeppelin_chain_registry::services::blockchain::{
	BlockChainError, ClientFactory, CosmosClientFactory, RpcClient,
};

#[tokio::test]
async fn test_chain_id_from_node_info() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("POST", "/")
		.match_body(Matcher::PartialJson(json!({"method": "status"})))
		.with_body(
			json!({
				"jsonrpc": "2.0",
				"id": 1,
				"result": {
					"node_info": {"network": "cosmoshub-4", "moniker": "node"},
					"sync_info": {"latest_block_height": "1"}
				}
			})
			.to_string(),
		)
		.create_async()
		.await;

	let client = CosmosClientFactory
		.new_client(&server.url(), Duration::from_secs(5))
		.unwrap();
	assert_eq!(client.chain_id().await.unwrap(), "cosmoshub-4");
	mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_network_is_request_error() {
	let mut server = Server::new_async().await;
	server
		.mock("POST", "/")
		.with_body(r#"{"jsonrpc":"2.0","id":1,"result":{"node_info":{}}}"#)
		.create_async()
		.await;

	let client = CosmosClientFactory
		.new_client(&server.url(), Duration::from_secs(5))
		.unwrap();
	assert!(matches!(
		client.chain_id().await,
		Err(BlockChainError::RequestError(_))
	));
}
