//! Mock implementations of relayers and plugin launchers.

use async_trait::async_trait;
use mockall::mock;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use openzeppelin_chain_registry::{
	models::{ChainStatus, Network, NodeState, NodeStatus, RelayerId},
	services::relayer::{
		encode_page_token, NodeStatusPage, PluginLauncher, Relayer, RelayerAdapter, RelayerError,
		Service,
	},
};

mock! {
	/// Mock implementation of a relayer.
	pub Relayer {}

	#[async_trait]
	impl Service for Relayer {
		fn name(&self) -> String;
		async fn start(&self) -> Result<(), RelayerError>;
		async fn close(&self) -> Result<(), RelayerError>;
	}

	#[async_trait]
	impl Relayer for Relayer {
		async fn get_chain_status(&self, ctx: &CancellationToken) -> Result<ChainStatus, RelayerError>;
		async fn list_node_statuses(
			&self,
			ctx: &CancellationToken,
			page_size: i32,
			page_token: &str,
		) -> Result<NodeStatusPage, RelayerError>;
	}
}

mock! {
	/// Mock implementation of the plugin launcher.
	pub PluginLauncher {}

	#[async_trait]
	impl PluginLauncher for PluginLauncher {
		async fn launch(
			&self,
			command: &str,
			network: Network,
			chain_id: &str,
			config_json: String,
		) -> Result<Arc<dyn Relayer>, RelayerError>;
	}
}

pub fn chain_status(id: &RelayerId) -> ChainStatus {
	ChainStatus {
		network: id.network,
		id: id.chain_id.clone(),
		enabled: true,
		config: "{}".to_string(),
	}
}

pub fn node_status(chain_id: &str, name: &str) -> NodeStatus {
	NodeStatus {
		chain_id: chain_id.to_string(),
		name: name.to_string(),
		url: format!("http://{}.test", name),
		state: NodeState::Unused,
		config: "{}".to_string(),
	}
}

/// A relayer answering every query successfully with `node_names` as its nodes
pub fn healthy_relayer(id: &RelayerId, node_names: &[&str]) -> MockRelayer {
	let mut relayer = MockRelayer::new();
	let name = format!("relayer {}", id);
	relayer.expect_name().returning(move || name.clone());

	let status = chain_status(id);
	relayer
		.expect_get_chain_status()
		.returning(move |_| Ok(status.clone()));

	let statuses: Vec<NodeStatus> = node_names
		.iter()
		.map(|node| node_status(&id.chain_id, node))
		.collect();
	relayer
		.expect_list_node_statuses()
		.returning(move |_, _, _| {
			Ok(NodeStatusPage {
				statuses: statuses.clone(),
				next_page_token: String::new(),
				total: statuses.len(),
			})
		});
	relayer.expect_start().returning(|| Ok(()));
	relayer.expect_close().returning(|| Ok(()));
	relayer
}

/// A relayer whose status queries fail with a plugin error
pub fn failing_relayer(id: &RelayerId) -> MockRelayer {
	let mut relayer = MockRelayer::new();
	let name = format!("relayer {}", id);
	relayer.expect_name().returning(move || name.clone());
	let message = format!("{} is down", id);
	let node_message = message.clone();
	relayer
		.expect_get_chain_status()
		.returning(move |_| Err(RelayerError::PluginError(message.clone())));
	relayer
		.expect_list_node_statuses()
		.returning(move |_, _, _| Err(RelayerError::PluginError(node_message.clone())));
	relayer
}

/// A relayer reporting a single node whose pages always point at the next
/// index, with `repeat` making every page return the first page's token
pub fn runaway_relayer(id: &RelayerId, repeat: bool) -> MockRelayer {
	let mut relayer = MockRelayer::new();
	let name = format!("relayer {}", id);
	relayer.expect_name().returning(move || name.clone());
	let chain_id = id.chain_id.clone();
	relayer
		.expect_list_node_statuses()
		.returning(move |_, _, token| {
			let next = if repeat || token.is_empty() {
				encode_page_token(0)
			} else {
				format!("{}=", token)
			};
			Ok(NodeStatusPage {
				statuses: vec![node_status(&chain_id, "n1")],
				next_page_token: next,
				total: 1,
			})
		});
	relayer
}

pub fn adapter(id: RelayerId, relayer: MockRelayer) -> RelayerAdapter {
	RelayerAdapter::new(id, Arc::new(relayer))
}

/// A relayer whose queries never complete
pub struct PendingRelayer;

#[async_trait]
impl Service for PendingRelayer {
	fn name(&self) -> String {
		"pending".to_string()
	}

	async fn start(&self) -> Result<(), RelayerError> {
		Ok(())
	}

	async fn close(&self) -> Result<(), RelayerError> {
		Ok(())
	}
}

#[async_trait]
impl Relayer for PendingRelayer {
	async fn get_chain_status(&self, _ctx: &CancellationToken) -> Result<ChainStatus, RelayerError> {
		futures::future::pending().await
	}

	async fn list_node_statuses(
		&self,
		_ctx: &CancellationToken,
		_page_size: i32,
		_page_token: &str,
	) -> Result<NodeStatusPage, RelayerError> {
		futures::future::pending().await
	}
}
