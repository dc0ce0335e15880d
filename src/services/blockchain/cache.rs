//! Per-chain cache of endpoint clients.
//!
//! Each endpoint URL maps to exactly one client instance for the lifetime of
//! the owning chain, together with the chain id the endpoint reported the
//! first time its identity was queried. Entries are never evicted.
//!
//! The cache lock only guards map access and client construction; identity
//! queries happen outside of it and are committed afterwards.

use std::{collections::HashMap, ops::Deref, sync::Arc};
use tokio::sync::Mutex;

use crate::services::blockchain::BlockChainError;

struct CachedClient<C> {
	client: Arc<C>,
	verified_chain_id: Option<String>,
}

/// Thread-safe map from endpoint URL to its client and verified identity
pub struct VerifiedClientCache<C> {
	entries: Mutex<HashMap<String, CachedClient<C>>>,
}

impl<C> VerifiedClientCache<C> {
	pub fn new() -> Self {
		Self {
			entries: Mutex::new(HashMap::new()),
		}
	}

	/// Returns the client cached for `url`, building it with `build` if none exists.
	///
	/// `build` runs while the lock is held, which is what guarantees a single
	/// construction per URL under concurrent callers. A failed build leaves
	/// the cache untouched.
	///
	/// # Returns
	/// * The client and the chain id it was verified with, if any
	pub async fn get_or_insert_with<F>(
		&self,
		url: &str,
		build: F,
	) -> Result<(Arc<C>, Option<String>), BlockChainError>
	where
		F: FnOnce() -> Result<C, BlockChainError>,
	{
		let mut entries = self.entries.lock().await;
		if let Some(entry) = entries.get(url) {
			return Ok((entry.client.clone(), entry.verified_chain_id.clone()));
		}

		let client = Arc::new(build()?);
		entries.insert(
			url.to_string(),
			CachedClient {
				client: client.clone(),
				verified_chain_id: None,
			},
		);
		Ok((client, None))
	}

	/// Records the chain id reported by `url`.
	///
	/// The first recorded value wins; later writes are no-ops. Returns the
	/// value stored in the cache.
	pub async fn record_verified(&self, url: &str, chain_id: &str) -> Option<String> {
		let mut entries = self.entries.lock().await;
		let entry = entries.get_mut(url)?;
		Some(
			entry
				.verified_chain_id
				.get_or_insert_with(|| chain_id.to_string())
				.clone(),
		)
	}

	/// Returns the cached client for `url` without constructing one
	pub async fn get(&self, url: &str) -> Option<(Arc<C>, Option<String>)> {
		self.entries
			.lock()
			.await
			.get(url)
			.map(|entry| (entry.client.clone(), entry.verified_chain_id.clone()))
	}

	/// Number of endpoints a client has been constructed for
	pub async fn len(&self) -> usize {
		self.entries.lock().await.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.entries.lock().await.is_empty()
	}
}

impl<C> Default for VerifiedClientCache<C> {
	fn default() -> Self {
		Self::new()
	}
}

/// A cached client together with the outcome of its identity check.
///
/// When the endpoint reported a different chain id than expected, the client
/// is still usable for calls that do not depend on the network identity, but
/// every identity-sensitive call reports [`BlockChainError::ChainIdMismatch`]
/// without issuing another RPC.
pub struct VerifiedClient<C> {
	client: Arc<C>,
	endpoint: String,
	expected_chain_id: String,
	reported_chain_id: String,
}

impl<C> VerifiedClient<C> {
	pub fn new(
		client: Arc<C>,
		endpoint: impl Into<String>,
		expected_chain_id: impl Into<String>,
		reported_chain_id: impl Into<String>,
	) -> Self {
		Self {
			client,
			endpoint: endpoint.into(),
			expected_chain_id: expected_chain_id.into(),
			reported_chain_id: reported_chain_id.into(),
		}
	}

	/// The shared client instance, identical for every caller of the same endpoint
	pub fn client(&self) -> &Arc<C> {
		&self.client
	}

	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	/// The chain id the endpoint reported when it was verified
	pub fn reported_chain_id(&self) -> &str {
		&self.reported_chain_id
	}

	/// Whether the endpoint serves the chain the client was requested for
	pub fn is_expected_chain(&self) -> bool {
		self.reported_chain_id == self.expected_chain_id
	}

	/// Fails with `ChainIdMismatch` when the endpoint serves another network
	pub fn ensure_identity(&self) -> Result<(), BlockChainError> {
		if self.is_expected_chain() {
			Ok(())
		} else {
			Err(BlockChainError::chain_id_mismatch(
				self.expected_chain_id.clone(),
				self.reported_chain_id.clone(),
				self.endpoint.clone(),
			))
		}
	}

	/// Identity-sensitive chain id lookup, answered from the verification result
	pub fn chain_id(&self) -> Result<String, BlockChainError> {
		self.ensure_identity()?;
		Ok(self.reported_chain_id.clone())
	}
}

impl<C> Clone for VerifiedClient<C> {
	fn clone(&self) -> Self {
		Self {
			client: self.client.clone(),
			endpoint: self.endpoint.clone(),
			expected_chain_id: self.expected_chain_id.clone(),
			reported_chain_id: self.reported_chain_id.clone(),
		}
	}
}

impl<C> Deref for VerifiedClient<C> {
	type Target = C;

	fn deref(&self) -> &Self::Target {
		&self.client
	}
}

impl<C> std::fmt::Debug for VerifiedClient<C> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("VerifiedClient")
			.field("endpoint", &self.endpoint)
			.field("expected_chain_id", &self.expected_chain_id)
			.field("reported_chain_id", &self.reported_chain_id)
			.finish()
	}
}
