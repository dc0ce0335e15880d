use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Network;

/// Status summary of a single chain as reported by its relayer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainStatus {
	pub network: Network,
	/// The protocol-native chain id
	pub id: String,
	pub enabled: bool,
	/// The chain configuration rendered as JSON
	pub config: String,
}

/// Health of a node as far as the client cache knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeState {
	/// No client has been constructed for the node yet
	Unused,
	/// A client exists but its identity has not been confirmed
	Unverified,
	/// The node reported the expected chain id
	Alive,
	/// The node reported a different chain id
	Mismatch,
}

impl fmt::Display for NodeState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			NodeState::Unused => "Unused",
			NodeState::Unverified => "Unverified",
			NodeState::Alive => "Alive",
			NodeState::Mismatch => "Mismatch",
		};
		f.write_str(s)
	}
}

/// Status of a single node of a chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStatus {
	pub chain_id: String,
	pub name: String,
	pub url: String,
	pub state: NodeState,
	/// The node configuration rendered as JSON
	pub config: String,
}
