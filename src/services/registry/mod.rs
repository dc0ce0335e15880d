//! Registry of every relayer of the application.
//!
//! The registry is built once from an ordered list of [`InitFn`]s and is
//! read-heavy afterwards. Lookups and snapshots happen under its lock; the
//! relayers themselves are only queried after the lock is released. Status
//! aggregations are deterministic: relayers are always visited in the order
//! of their id strings.

mod init;

pub use init::{init_cosmos, init_evm, init_for_network, init_solana, init_starknet, InitFn};

use futures::future::join_all;
use std::{collections::HashMap, future::Future, sync::Arc};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::{
	models::{ChainStatus, Network, NodeStatus, RelayerId},
	services::relayer::{paginate, Relayer, RelayerAdapter, RelayerError, Service},
};

/// Returns a [`RelayerRegistry::list`] filter matching the relayers of `network`
pub fn filter_by_network(network: Network) -> impl Fn(&RelayerId) -> bool {
	move |id| id.network == network
}

#[derive(Default)]
struct RegistryState {
	relayers: HashMap<RelayerId, RelayerAdapter>,
	/// Relayer ids in construction order
	order: Vec<RelayerId>,
}

impl RegistryState {
	fn insert(&mut self, adapter: RelayerAdapter) -> Result<(), RelayerError> {
		let id = adapter.id().clone();
		if self.relayers.contains_key(&id) {
			return Err(RelayerError::DuplicateRelayer(id));
		}
		self.order.push(id.clone());
		self.relayers.insert(id, adapter);
		Ok(())
	}
}

/// Map of relayer ids to relayers, with status aggregation across them
#[derive(Default)]
pub struct RelayerRegistry {
	state: RwLock<RegistryState>,
}

impl RelayerRegistry {
	/// Builds the registry by running `init_fns` in order.
	///
	/// # Errors
	/// * `InitError` - An init function failed or produced an id that is
	///   already registered; no registry is returned
	pub async fn new(init_fns: Vec<InitFn>) -> Result<Self, RelayerError> {
		let mut state = RegistryState::default();
		for init_fn in init_fns {
			let network = init_fn.network();
			let adapters = init_fn
				.run()
				.await
				.map_err(|e| RelayerError::init_error(network, e))?;
			info!(network = %network, relayers = adapters.len(), "Initialized relayers");
			for adapter in adapters {
				state
					.insert(adapter)
					.map_err(|e| RelayerError::init_error(network, e))?;
			}
		}
		Ok(Self {
			state: RwLock::new(state),
		})
	}

	/// Registers another relayer
	///
	/// # Errors
	/// * `DuplicateRelayer` - A relayer with the same id exists
	pub async fn insert(&self, adapter: RelayerAdapter) -> Result<(), RelayerError> {
		self.state.write().await.insert(adapter)
	}

	pub async fn get(&self, id: &RelayerId) -> Result<RelayerAdapter, RelayerError> {
		self.state
			.read()
			.await
			.relayers
			.get(id)
			.cloned()
			.ok_or_else(|| RelayerError::NoSuchRelayer(id.clone()))
	}

	/// Returns an independent registry holding only the relayers matching `filter`
	pub async fn list<P>(&self, filter: P) -> RelayerRegistry
	where
		P: Fn(&RelayerId) -> bool,
	{
		let state = self.state.read().await;
		let mut filtered = RegistryState::default();
		for id in state.order.iter().filter(|&id| filter(id)) {
			filtered.order.push(id.clone());
			if let Some(adapter) = state.relayers.get(id) {
				filtered.relayers.insert(id.clone(), adapter.clone());
			}
		}
		RelayerRegistry {
			state: RwLock::new(filtered),
		}
	}

	/// All relayers ordered by their id string
	pub async fn slice(&self) -> Vec<RelayerAdapter> {
		let mut adapters: Vec<RelayerAdapter> =
			self.state.read().await.relayers.values().cloned().collect();
		adapters.sort_by_cached_key(|adapter| adapter.id().to_string());
		adapters
	}

	/// Lifecycle services of every relayer, in construction order
	pub async fn services(&self) -> Vec<Arc<dyn Service>> {
		let state = self.state.read().await;
		state
			.order
			.iter()
			.filter_map(|id| state.relayers.get(id))
			.map(|adapter| Arc::new(adapter.clone()) as Arc<dyn Service>)
			.collect()
	}

	pub async fn len(&self) -> usize {
		self.state.read().await.relayers.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.state.read().await.relayers.is_empty()
	}

	/// Status of a single relayer
	///
	/// # Errors
	/// * `NoSuchRelayer` - No relayer is registered under `id`
	/// * Any error of the relayer
	pub async fn chain_status(
		&self,
		ctx: &CancellationToken,
		id: &RelayerId,
	) -> Result<ChainStatus, RelayerError> {
		let adapter = self.get(id).await?;
		cancellable(ctx, adapter.get_chain_status(ctx)).await
	}

	/// Chain statuses of every relayer, ordered by id string.
	///
	/// All relayers are queried before paging; if any query fails the whole
	/// call fails. `limit <= 0` returns everything from `offset` on.
	///
	/// # Returns
	/// * The requested page and the total number of relayers
	pub async fn chain_statuses(
		&self,
		ctx: &CancellationToken,
		offset: usize,
		limit: i64,
	) -> Result<(Vec<ChainStatus>, usize), RelayerError> {
		let adapters = self.slice().await;
		let count = adapters.len();

		let results = cancellable(ctx, async {
			Ok(join_all(adapters.iter().map(|adapter| adapter.get_chain_status(ctx))).await)
		})
		.await?;

		let mut statuses = Vec::with_capacity(count);
		let mut errors = Vec::new();
		for result in results {
			match result {
				Ok(status) => statuses.push(status),
				Err(e) => errors.push(e),
			}
		}
		check_errors(errors)?;

		Ok((paginate(statuses, offset, limit), count))
	}

	/// Node statuses of the relayers named by `ids`, or of every relayer when
	/// `ids` is empty.
	///
	/// Statuses are ordered by relayer id string, then by node order. Unknown
	/// ids and failed queries fail the whole call.
	///
	/// # Returns
	/// * The requested page and the total number of nodes
	pub async fn node_statuses(
		&self,
		ctx: &CancellationToken,
		offset: usize,
		limit: i64,
		ids: &[RelayerId],
	) -> Result<(Vec<NodeStatus>, usize), RelayerError> {
		let mut errors = Vec::new();
		let targets = if ids.is_empty() {
			self.slice().await
		} else {
			let state = self.state.read().await;
			let mut targets = Vec::with_capacity(ids.len());
			for id in ids {
				match state.relayers.get(id) {
					Some(adapter) => targets.push(adapter.clone()),
					None => errors.push(RelayerError::NoSuchRelayer(id.clone())),
				}
			}
			targets.sort_by_cached_key(|adapter| adapter.id().to_string());
			targets.dedup_by(|a, b| a.id() == b.id());
			targets
		};

		let results = cancellable(ctx, async {
			Ok(join_all(targets.iter().map(|adapter| adapter.all_node_statuses(ctx, 0))).await)
		})
		.await?;

		let mut count = 0;
		let mut statuses = Vec::new();
		for result in results {
			match result {
				Ok(mut page) => {
					count += page.total;
					statuses.append(&mut page.statuses);
				}
				Err(e) => errors.push(e),
			}
		}
		if !errors.is_empty() {
			warn!(count, failures = errors.len(), "Node status aggregation failed");
		}
		check_errors(errors)?;

		Ok((paginate(statuses, offset, limit), count))
	}
}

/// Runs `fut` unless `ctx` is cancelled first
async fn cancellable<T, Fut>(ctx: &CancellationToken, fut: Fut) -> Result<T, RelayerError>
where
	Fut: Future<Output = Result<T, RelayerError>>,
{
	if ctx.is_cancelled() {
		return Err(RelayerError::Cancelled);
	}
	tokio::select! {
		biased;
		_ = ctx.cancelled() => Err(RelayerError::Cancelled),
		result = fut => result,
	}
}

/// All-or-nothing check of an aggregation; cancellation wins over other errors
fn check_errors(errors: Vec<RelayerError>) -> Result<(), RelayerError> {
	if errors.is_empty() {
		return Ok(());
	}
	if errors.iter().any(RelayerError::is_cancelled) {
		return Err(RelayerError::Cancelled);
	}
	Err(RelayerError::aggregate(errors))
}
