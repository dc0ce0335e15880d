//! Blockchain client implementations.
//!
//! Contains the identity clients of every supported protocol family:
//! - EVM client for Ethereum-compatible chains
//! - Solana client for Solana clusters
//! - Cosmos client for Tendermint based chains
//! - Starknet client for Starknet networks
//!
//! Each client comes with a [`ClientFactory`](crate::services::blockchain::ClientFactory)
//! building it over the HTTP transport.

mod evm {
	pub mod client;
}
mod solana {
	pub mod client;
}
mod cosmos {
	pub mod client;
}
mod starknet {
	pub mod client;
}

pub use cosmos::client::{CosmosClient, CosmosClientFactory};
pub use evm::client::{EvmClient, EvmClientFactory};
pub use solana::client::{cluster_for_genesis_hash, SolanaClient, SolanaClientFactory};
pub use starknet::client::{decode_short_string, StarknetClient, StarknetClientFactory};
