use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Network;

/// Globally unique identity of a relayer: the protocol family plus the
/// protocol-native chain id.
///
/// The string form `"<network>.<chain_id>"` is the stable ordering key used
/// for pagination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelayerId {
	pub network: Network,
	pub chain_id: String,
}

impl RelayerId {
	pub fn new(network: Network, chain_id: impl Into<String>) -> Self {
		Self {
			network,
			chain_id: chain_id.into(),
		}
	}
}

impl fmt::Display for RelayerId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}", self.network, self.chain_id)
	}
}
