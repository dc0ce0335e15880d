//! Bootstrap module for building the registry and driving its services.
//!
//! - `initialize_registry`: Groups chain configs by network and builds the registry
//!   with one init step per network
//! - `start_services` / `close_services`: Lifecycle of the registry's services

use std::sync::Arc;
use tracing::{error, info};

use crate::{
	models::{ChainConfig, Network},
	services::{
		registry::{init_for_network, InitFn, RelayerRegistry},
		relayer::{PluginCommands, PluginLauncher, RelayerError, RelayerFactory, Service},
	},
};

/// Creates the ordered init steps for `configs`, one per network that has configs
pub fn create_init_fns(
	configs: impl IntoIterator<Item = ChainConfig>,
	factory: Arc<RelayerFactory>,
) -> Vec<InitFn> {
	let configs: Vec<ChainConfig> = configs.into_iter().collect();
	Network::ALL
		.into_iter()
		.filter_map(|network| {
			let chains: Vec<ChainConfig> = configs
				.iter()
				.filter(|config| config.network == network)
				.cloned()
				.collect();
			(!chains.is_empty()).then(|| init_for_network(network, factory.clone(), chains))
		})
		.collect()
}

/// Builds the registry of every configured chain.
///
/// # Errors
/// Returns the first initialization error; no partial registry is built
pub async fn initialize_registry(
	configs: impl IntoIterator<Item = ChainConfig>,
	plugin_commands: PluginCommands,
	launcher: Arc<dyn PluginLauncher>,
) -> Result<RelayerRegistry, RelayerError> {
	let factory = Arc::new(RelayerFactory::new(plugin_commands, launcher));
	RelayerRegistry::new(create_init_fns(configs, factory)).await
}

/// Starts `services` in order, stopping at the first failure.
///
/// # Returns
/// * The services that were started, so they can be closed again
pub async fn start_services(
	services: &[Arc<dyn Service>],
) -> Result<Vec<Arc<dyn Service>>, RelayerError> {
	let mut started = Vec::with_capacity(services.len());
	for service in services {
		if let Err(e) = service.start().await {
			error!(service = %service.name(), error = %e, "Failed to start service");
			close_services(&started).await;
			return Err(e);
		}
		started.push(service.clone());
	}
	info!(services = started.len(), "Services started");
	Ok(started)
}

/// Closes `services` in reverse order, logging failures
pub async fn close_services(services: &[Arc<dyn Service>]) {
	for service in services.iter().rev() {
		if let Err(e) = service.close().await {
			error!(service = %service.name(), error = %e, "Failed to close service");
		}
	}
}
