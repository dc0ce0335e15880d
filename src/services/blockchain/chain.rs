//! A configured chain instance and its endpoint selection.
//!
//! The chain owns its node list and a [`VerifiedClientCache`]. Client
//! selection visits the nodes in random order and returns the first one
//! whose reported chain id matches the configured one.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::sync::Mutex;
use tracing::{debug, warn};

use crate::{
	models::{ChainConfig, Node, NodeState},
	services::blockchain::{
		BlockChainError, ClientFactory, RpcClient, VerifiedClient, VerifiedClientCache,
	},
};

/// One configured network instance with its pool of RPC endpoints
pub struct Chain<F: ClientFactory> {
	config: ChainConfig,
	factory: F,
	cache: VerifiedClientCache<F::Client>,
	rng: Mutex<StdRng>,
}

impl<F: ClientFactory> Chain<F> {
	/// Creates a new chain with a randomly seeded node selection order
	pub fn new(config: ChainConfig, factory: F) -> Self {
		Self::with_rng(config, factory, StdRng::from_os_rng())
	}

	/// Creates a new chain whose node selection order is reproducible
	pub fn with_seed(config: ChainConfig, factory: F, seed: u64) -> Self {
		Self::with_rng(config, factory, StdRng::seed_from_u64(seed))
	}

	fn with_rng(config: ChainConfig, factory: F, rng: StdRng) -> Self {
		Self {
			config,
			factory,
			cache: VerifiedClientCache::new(),
			rng: Mutex::new(rng),
		}
	}

	/// The configured chain id
	pub fn id(&self) -> &str {
		&self.config.chain_id
	}

	pub fn config(&self) -> &ChainConfig {
		&self.config
	}

	pub fn nodes(&self) -> &[Node] {
		&self.config.nodes
	}

	/// Returns a client for any node serving this chain.
	///
	/// Every node is tried, in random order, until one reports the expected
	/// chain id. When none does, the last client that answered is returned
	/// without an error and its identity-sensitive calls report the mismatch,
	/// unless `strict_node_selection` is set, in which case
	/// `NoVerifiedNodeAvailable` is returned.
	///
	/// # Errors
	/// * `NoNodesAvailable` - The chain has no configured nodes
	/// * `ConnectionError` - No node could be reached at all
	/// * `NoVerifiedNodeAvailable` - Strict selection found no matching node
	pub async fn get_client(&self) -> Result<VerifiedClient<F::Client>, BlockChainError> {
		let nodes = self.nodes();
		if nodes.is_empty() {
			return Err(BlockChainError::no_nodes_available(self.id()));
		}

		let mut fallback = None;
		let mut failures = Vec::new();
		for index in self.selection_order(nodes.len()) {
			let node = &nodes[index];
			match self.verified_client(node).await {
				Ok(client) if client.is_expected_chain() => {
					debug!(chain_id = self.id(), node = %node.name, "Selected node");
					return Ok(client);
				}
				Ok(client) => {
					warn!(
						chain_id = self.id(),
						node = %node.name,
						reported = client.reported_chain_id(),
						"Node serves a different chain"
					);
					fallback = Some(client);
				}
				Err(e) => {
					warn!(chain_id = self.id(), node = %node.name, error = %e, "Node unavailable");
					failures.push(format!("{}: {}", node.name, e));
				}
			}
		}

		if self.config.strict_node_selection {
			return Err(BlockChainError::no_verified_node_available(self.id()));
		}

		match fallback {
			Some(client) => {
				warn!(
					chain_id = self.id(),
					endpoint = client.endpoint(),
					"No node matched the chain id, using last client tried"
				);
				Ok(client)
			}
			None => Err(BlockChainError::connection_error(format!(
				"All nodes failed for chain {}: {}",
				self.id(),
				failures.join("; ")
			))),
		}
	}

	/// Returns the cached client for `node`, verifying its identity if needed.
	///
	/// The client is built at most once per URL. The identity RPC is issued
	/// only until it succeeds once; afterwards the recorded chain id is
	/// compared against this chain's id on every call.
	///
	/// # Errors
	/// * `ConnectionError` - The client could not be built or the identity query failed
	pub async fn verified_client(
		&self,
		node: &Node,
	) -> Result<VerifiedClient<F::Client>, BlockChainError> {
		let timeout = self.config.request_timeout();
		let (client, verified_chain_id) = self
			.cache
			.get_or_insert_with(&node.url, || self.factory.new_client(&node.url, timeout))
			.await
			.map_err(|e| {
				BlockChainError::connection_error(format!(
					"Failed to create client for node {}: {}",
					node.name, e
				))
			})?;

		let reported = match verified_chain_id {
			Some(chain_id) => chain_id,
			None => {
				let chain_id = client.chain_id().await.map_err(|e| {
					BlockChainError::connection_error(format!(
						"Failed to verify node {}: {}",
						node.name, e
					))
				})?;
				let recorded = self.cache.record_verified(&node.url, &chain_id).await;
				recorded.unwrap_or(chain_id)
			}
		};

		Ok(VerifiedClient::new(
			client,
			node.url.clone(),
			self.id(),
			reported,
		))
	}

	/// Returns what the cache knows about `node`, without network calls
	pub async fn node_state(&self, node: &Node) -> NodeState {
		match self.cache.get(&node.url).await {
			None => NodeState::Unused,
			Some((_, None)) => NodeState::Unverified,
			Some((_, Some(chain_id))) if chain_id == self.id() => NodeState::Alive,
			Some(_) => NodeState::Mismatch,
		}
	}

	/// Number of node clients constructed so far
	pub async fn cached_clients(&self) -> usize {
		self.cache.len().await
	}

	fn selection_order(&self, len: usize) -> Vec<usize> {
		let mut order: Vec<usize> = (0..len).collect();
		let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
		order.shuffle(&mut *rng);
		order
	}
}
