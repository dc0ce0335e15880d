//! Blockchain platform identifiers.
//!
//! Every relayer in the registry belongs to exactly one protocol family. The
//! family is part of the relayer's identity and drives which client factory
//! and plugin command are used to build it.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Supported blockchain protocol families
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Network {
	/// Ethereum Virtual Machine based chains
	#[serde(rename = "evm")]
	EVM,
	/// Solana clusters
	Solana,
	/// Cosmos SDK / Tendermint chains
	Cosmos,
	/// Starknet networks
	Starknet,
}

impl Network {
	/// All supported networks, in the order their relayers are initialized
	pub const ALL: [Network; 4] = [
		Network::EVM,
		Network::Solana,
		Network::Cosmos,
		Network::Starknet,
	];

	/// Lowercase name used in relayer ids, config files and env vars
	pub fn as_str(&self) -> &'static str {
		match self {
			Network::EVM => "evm",
			Network::Solana => "solana",
			Network::Cosmos => "cosmos",
			Network::Starknet => "starknet",
		}
	}
}

impl fmt::Display for Network {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Network {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"evm" => Ok(Network::EVM),
			"solana" => Ok(Network::Solana),
			"cosmos" => Ok(Network::Cosmos),
			"starknet" => Ok(Network::Starknet),
			other => Err(format!("Unknown network: {}", other)),
		}
	}
}
