//! Blockchain client interfaces and implementations.
//!
//! Provides the endpoint machinery behind every embedded relayer:
//!
//! - Client traits implemented by each protocol
//! - Protocol specific identity clients
//! - The HTTP JSON-RPC transport
//! - The per-chain verified client cache
//! - Chain endpoint selection

mod cache;
mod chain;
mod client;
mod clients;
mod error;
mod transports;

pub use cache::{VerifiedClient, VerifiedClientCache};
pub use chain::Chain;
pub use client::{ClientFactory, RpcClient};
pub use clients::{
	cluster_for_genesis_hash, decode_short_string, CosmosClient, CosmosClientFactory, EvmClient,
	EvmClientFactory, SolanaClient, SolanaClientFactory, StarknetClient, StarknetClientFactory,
};
pub use error::BlockChainError;
pub use transports::{BlockchainTransport, HttpRetryConfig, HttpTransportClient};
