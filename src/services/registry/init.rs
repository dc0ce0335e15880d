//! Ordered initialization steps of the registry.

use futures::future::BoxFuture;
use std::{fmt, future::Future, sync::Arc};

use crate::{
	models::{ChainConfig, Network},
	services::relayer::{RelayerAdapter, RelayerError, RelayerFactory},
};

type InitFuture = BoxFuture<'static, Result<Vec<RelayerAdapter>, RelayerError>>;

/// Produces the relayers of one protocol family when the registry is built
pub struct InitFn {
	network: Network,
	init: Box<dyn FnOnce() -> InitFuture + Send>,
}

impl InitFn {
	pub fn new<F, Fut>(network: Network, init: F) -> Self
	where
		F: FnOnce() -> Fut + Send + 'static,
		Fut: Future<Output = Result<Vec<RelayerAdapter>, RelayerError>> + Send + 'static,
	{
		Self {
			network,
			init: Box::new(move || Box::pin(init()) as InitFuture),
		}
	}

	pub fn network(&self) -> Network {
		self.network
	}

	pub(crate) async fn run(self) -> Result<Vec<RelayerAdapter>, RelayerError> {
		(self.init)().await
	}
}

impl fmt::Debug for InitFn {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("InitFn")
			.field("network", &self.network)
			.finish()
	}
}

pub fn init_evm(factory: Arc<RelayerFactory>, configs: Vec<ChainConfig>) -> InitFn {
	InitFn::new(Network::EVM, move || async move {
		factory.new_evm(&configs).await
	})
}

pub fn init_solana(factory: Arc<RelayerFactory>, configs: Vec<ChainConfig>) -> InitFn {
	InitFn::new(Network::Solana, move || async move {
		factory.new_solana(&configs).await
	})
}

pub fn init_cosmos(factory: Arc<RelayerFactory>, configs: Vec<ChainConfig>) -> InitFn {
	InitFn::new(Network::Cosmos, move || async move {
		factory.new_cosmos(&configs).await
	})
}

pub fn init_starknet(factory: Arc<RelayerFactory>, configs: Vec<ChainConfig>) -> InitFn {
	InitFn::new(Network::Starknet, move || async move {
		factory.new_starknet(&configs).await
	})
}

/// Returns the init step of `network`
pub fn init_for_network(
	network: Network,
	factory: Arc<RelayerFactory>,
	configs: Vec<ChainConfig>,
) -> InitFn {
	match network {
		Network::EVM => init_evm(factory, configs),
		Network::Solana => init_solana(factory, configs),
		Network::Cosmos => init_cosmos(factory, configs),
		Network::Starknet => init_starknet(factory, configs),
	}
}
