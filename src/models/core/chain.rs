use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

use crate::models::{Network, Node, RelayerId};

/// Default timeout applied to every RPC request issued against a node
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

fn default_enabled() -> bool {
	true
}

fn default_request_timeout_ms() -> u64 {
	DEFAULT_REQUEST_TIMEOUT_MS
}

/// Configuration of one chain instance of a protocol family
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ChainConfig {
	pub network: Network,
	pub chain_id: String,
	#[serde(default = "default_enabled")]
	pub enabled: bool,
	pub nodes: Vec<Node>,
	#[serde(default = "default_request_timeout_ms")]
	pub request_timeout_ms: u64,
	/// Fail client selection when no node reports the expected chain id
	/// instead of falling back to the last client tried
	#[serde(default)]
	pub strict_node_selection: bool,
	/// Protocol-specific settings, passed through untouched
	#[serde(default, skip_serializing_if = "Map::is_empty")]
	pub settings: Map<String, Value>,
}

impl ChainConfig {
	pub fn relayer_id(&self) -> RelayerId {
		RelayerId::new(self.network, self.chain_id.clone())
	}

	pub fn request_timeout(&self) -> Duration {
		Duration::from_millis(self.request_timeout_ms)
	}
}
