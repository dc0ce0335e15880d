use async_trait::async_trait;
use std::{fmt, sync::Arc};
use tokio_util::sync::CancellationToken;

use crate::{
	models::{ChainStatus, RelayerId},
	services::relayer::{NodeStatusPage, Relayer, RelayerError, Service},
};

/// A relayer together with the id it is registered under.
///
/// Cloning is cheap and every clone drives the same underlying relayer.
#[derive(Clone)]
pub struct RelayerAdapter {
	id: RelayerId,
	relayer: Arc<dyn Relayer>,
}

impl RelayerAdapter {
	pub fn new(id: RelayerId, relayer: Arc<dyn Relayer>) -> Self {
		Self { id, relayer }
	}

	pub fn id(&self) -> &RelayerId {
		&self.id
	}

	pub fn relayer(&self) -> &Arc<dyn Relayer> {
		&self.relayer
	}

	/// Whether both adapters drive the same relayer instance
	pub fn ptr_eq(&self, other: &RelayerAdapter) -> bool {
		Arc::ptr_eq(&self.relayer, &other.relayer)
	}

	/// Collects every node status of the relayer, following page tokens.
	///
	/// # Errors
	/// * `InvalidPageToken` - A page repeats its own token, or the relayer
	///   keeps paging past the total it reported on the first page
	pub async fn all_node_statuses(
		&self,
		ctx: &CancellationToken,
		page_size: i32,
	) -> Result<NodeStatusPage, RelayerError> {
		let mut page = self.relayer.list_node_statuses(ctx, page_size, "").await?;
		let mut next = std::mem::take(&mut page.next_page_token);
		let mut pages = 1;
		while !next.is_empty() {
			if pages > page.total {
				return Err(RelayerError::invalid_page_token(format!(
					"{} (relayer {} returned more than {} pages)",
					next, self.id, page.total
				)));
			}
			let mut more = self.relayer.list_node_statuses(ctx, page_size, &next).await?;
			if more.next_page_token == next {
				return Err(RelayerError::invalid_page_token(format!(
					"{} (relayer {} did not advance)",
					next, self.id
				)));
			}
			page.statuses.append(&mut more.statuses);
			next = more.next_page_token;
			pages += 1;
		}
		Ok(page)
	}
}

impl fmt::Debug for RelayerAdapter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RelayerAdapter")
			.field("id", &self.id)
			.field("name", &self.relayer.name())
			.finish()
	}
}

#[async_trait]
impl Service for RelayerAdapter {
	fn name(&self) -> String {
		self.relayer.name()
	}

	async fn start(&self) -> Result<(), RelayerError> {
		self.relayer.start().await
	}

	async fn close(&self) -> Result<(), RelayerError> {
		self.relayer.close().await
	}
}

#[async_trait]
impl Relayer for RelayerAdapter {
	async fn get_chain_status(&self, ctx: &CancellationToken) -> Result<ChainStatus, RelayerError> {
		self.relayer.get_chain_status(ctx).await
	}

	async fn list_node_statuses(
		&self,
		ctx: &CancellationToken,
		page_size: i32,
		page_token: &str,
	) -> Result<NodeStatusPage, RelayerError> {
		self.relayer
			.list_node_statuses(ctx, page_size, page_token)
			.await
	}
}
