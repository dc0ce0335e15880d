//! Construction of relayers for each protocol family.
//!
//! Every enabled chain instance yields exactly one [`RelayerAdapter`]. When a
//! plugin command is configured for the protocol the relayer runs out of
//! process, otherwise it is an embedded [`ChainRelayer`].

use std::{collections::HashMap, collections::HashSet, sync::Arc};
use tracing::{debug, info};

use crate::{
	models::{ChainConfig, Network},
	services::{
		blockchain::{
			Chain, ClientFactory, CosmosClientFactory, EvmClientFactory, SolanaClientFactory,
			StarknetClientFactory,
		},
		relayer::{ChainRelayer, PluginLauncher, Relayer, RelayerAdapter, RelayerError},
	},
};

/// Plugin command lines keyed by protocol family
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginCommands {
	commands: HashMap<Network, String>,
}

impl PluginCommands {
	pub fn new() -> Self {
		Self::default()
	}

	/// Name of the environment variable holding the plugin command of `network`
	pub fn env_var(network: Network) -> String {
		format!("RELAYER_{}_PLUGIN_CMD", network.as_str().to_uppercase())
	}

	/// Reads `RELAYER_<NETWORK>_PLUGIN_CMD` for every network, ignoring blank values
	pub fn from_env() -> Self {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Like [`PluginCommands::from_env`] but with a custom variable lookup
	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
		let commands = Network::ALL
			.into_iter()
			.filter_map(|network| {
				lookup(&Self::env_var(network))
					.map(|cmd| cmd.trim().to_string())
					.filter(|cmd| !cmd.is_empty())
					.map(|cmd| (network, cmd))
			})
			.collect();
		Self { commands }
	}

	pub fn with_command(mut self, network: Network, command: impl Into<String>) -> Self {
		self.commands.insert(network, command.into());
		self
	}

	pub fn get(&self, network: Network) -> Option<&str> {
		self.commands.get(&network).map(String::as_str)
	}
}

/// Builds the relayers of each protocol family from their chain configs
pub struct RelayerFactory {
	plugin_commands: PluginCommands,
	launcher: Arc<dyn PluginLauncher>,
}

impl RelayerFactory {
	pub fn new(plugin_commands: PluginCommands, launcher: Arc<dyn PluginLauncher>) -> Self {
		Self {
			plugin_commands,
			launcher,
		}
	}

	pub async fn new_evm(&self, configs: &[ChainConfig]) -> Result<Vec<RelayerAdapter>, RelayerError> {
		self.new_relayers(Network::EVM, configs, EvmClientFactory)
			.await
	}

	pub async fn new_solana(
		&self,
		configs: &[ChainConfig],
	) -> Result<Vec<RelayerAdapter>, RelayerError> {
		self.new_relayers(Network::Solana, configs, SolanaClientFactory)
			.await
	}

	pub async fn new_cosmos(
		&self,
		configs: &[ChainConfig],
	) -> Result<Vec<RelayerAdapter>, RelayerError> {
		self.new_relayers(Network::Cosmos, configs, CosmosClientFactory)
			.await
	}

	pub async fn new_starknet(
		&self,
		configs: &[ChainConfig],
	) -> Result<Vec<RelayerAdapter>, RelayerError> {
		self.new_relayers(Network::Starknet, configs, StarknetClientFactory)
			.await
	}

	/// Builds one adapter per enabled config of `network`.
	///
	/// Embedded relayers use a clone of `client_factory` for their chain.
	///
	/// # Errors
	/// * `InternalError` - A config belongs to another network
	/// * `DuplicateRelayer` - Two enabled configs share a chain id
	/// * Any error of the plugin launcher
	pub async fn new_relayers<F>(
		&self,
		network: Network,
		configs: &[ChainConfig],
		client_factory: F,
	) -> Result<Vec<RelayerAdapter>, RelayerError>
	where
		F: ClientFactory + Clone,
	{
		let mut seen = HashSet::new();
		let mut adapters = Vec::new();

		for config in configs {
			if config.network != network {
				return Err(RelayerError::internal_error(format!(
					"Chain {} is a {} chain, not {}",
					config.chain_id, config.network, network
				)));
			}
			if !config.enabled {
				debug!(relayer = %config.relayer_id(), "Skipping disabled chain");
				continue;
			}

			let id = config.relayer_id();
			if !seen.insert(id.clone()) {
				return Err(RelayerError::DuplicateRelayer(id));
			}

			let relayer: Arc<dyn Relayer> = match self.plugin_commands.get(network) {
				Some(command) => {
					info!(relayer = %id, command, "Launching plugin relayer");
					self.launcher
						.launch(
							command,
							network,
							&config.chain_id,
							serde_json::to_string(config)?,
						)
						.await?
				}
				None => {
					info!(relayer = %id, nodes = config.nodes.len(), "Creating embedded relayer");
					Arc::new(ChainRelayer::new(Chain::new(
						config.clone(),
						client_factory.clone(),
					)))
				}
			};
			adapters.push(RelayerAdapter::new(id, relayer));
		}

		Ok(adapters)
	}
}
