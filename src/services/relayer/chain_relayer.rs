//! Embedded relayer over a [`Chain`] of the local process.

use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::{
	models::{ChainStatus, NodeStatus, RelayerId},
	services::{
		blockchain::{Chain, ClientFactory, VerifiedClient},
		relayer::{page_range, NodeStatusPage, Relayer, RelayerError, Service, ServiceState},
	},
};

/// Relayer for one chain whose clients live in this process
pub struct ChainRelayer<F: ClientFactory> {
	id: RelayerId,
	chain: Arc<Chain<F>>,
	state: ServiceState,
}

impl<F: ClientFactory> ChainRelayer<F> {
	pub fn new(chain: Chain<F>) -> Self {
		Self::from_shared(Arc::new(chain))
	}

	/// Creates a relayer over a chain shared with other components
	pub fn from_shared(chain: Arc<Chain<F>>) -> Self {
		Self {
			id: chain.config().relayer_id(),
			chain,
			state: ServiceState::new(),
		}
	}

	pub fn id(&self) -> &RelayerId {
		&self.id
	}

	pub fn chain(&self) -> &Arc<Chain<F>> {
		&self.chain
	}

	/// Selects a client for the chain, verifying node identities as needed
	pub async fn client(&self) -> Result<VerifiedClient<F::Client>, RelayerError> {
		Ok(self.chain.get_client().await?)
	}
}

#[async_trait]
impl<F: ClientFactory> Service for ChainRelayer<F> {
	fn name(&self) -> String {
		format!("relayer {}", self.id)
	}

	async fn start(&self) -> Result<(), RelayerError> {
		self.state.start_once(&self.name())?;
		match self.client().await {
			Ok(client) if client.is_expected_chain() => {
				info!(relayer = %self.id, endpoint = client.endpoint(), "Relayer started");
			}
			Ok(client) => {
				warn!(
					relayer = %self.id,
					endpoint = client.endpoint(),
					reported = client.reported_chain_id(),
					"Relayer started on a node serving another chain"
				);
			}
			Err(e) => {
				warn!(relayer = %self.id, error = %e, "Relayer started without a reachable node");
			}
		}
		Ok(())
	}

	async fn close(&self) -> Result<(), RelayerError> {
		self.state.stop_once(&self.name())?;
		info!(relayer = %self.id, "Relayer closed");
		Ok(())
	}
}

#[async_trait]
impl<F: ClientFactory> Relayer for ChainRelayer<F> {
	async fn get_chain_status(&self, ctx: &CancellationToken) -> Result<ChainStatus, RelayerError> {
		if ctx.is_cancelled() {
			return Err(RelayerError::Cancelled);
		}
		let config = self.chain.config();
		Ok(ChainStatus {
			network: config.network,
			id: config.chain_id.clone(),
			enabled: config.enabled,
			config: serde_json::to_string_pretty(config)?,
		})
	}

	async fn list_node_statuses(
		&self,
		ctx: &CancellationToken,
		page_size: i32,
		page_token: &str,
	) -> Result<NodeStatusPage, RelayerError> {
		if ctx.is_cancelled() {
			return Err(RelayerError::Cancelled);
		}
		let nodes = self.chain.nodes();
		let (range, next_page_token) = page_range(nodes.len(), page_size, page_token)?;

		let mut statuses = Vec::with_capacity(range.len());
		for node in &nodes[range] {
			statuses.push(NodeStatus {
				chain_id: self.chain.id().to_string(),
				name: node.name.clone(),
				url: node.url.clone(),
				state: self.chain.node_state(node).await,
				config: serde_json::to_string(node)?,
			});
		}

		Ok(NodeStatusPage {
			statuses,
			next_page_token,
			total: nodes.len(),
		})
	}
}
