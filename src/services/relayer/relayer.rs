//! The uniform relayer capability.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::{
	models::{ChainStatus, NodeStatus},
	services::relayer::{RelayerError, Service},
};

/// One page of node statuses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStatusPage {
	pub statuses: Vec<NodeStatus>,
	/// Token of the next page, empty on the last page
	#[serde(default)]
	pub next_page_token: String,
	/// Number of nodes of the chain across all pages
	pub total: usize,
}

/// Status and node queries over one chain, independent of its protocol
/// and of whether it runs embedded or in a plugin process.
#[async_trait]
pub trait Relayer: Service {
	async fn get_chain_status(&self, ctx: &CancellationToken) -> Result<ChainStatus, RelayerError>;

	/// Lists node statuses page by page
	///
	/// # Arguments
	/// * `page_size` - Maximum number of statuses, `<= 0` for all remaining
	/// * `page_token` - Token from a previous page, empty for the first page
	async fn list_node_statuses(
		&self,
		ctx: &CancellationToken,
		page_size: i32,
		page_token: &str,
	) -> Result<NodeStatusPage, RelayerError>;
}
