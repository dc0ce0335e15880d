use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use openzeppelin_chain_registry::{
	models::{ChainConfig, Network, NodeState, RelayerId},
	services::relayer::{PluginCommands, Relayer, RelayerError, RelayerFactory},
};

use crate::integration::mocks::{chain_config, healthy_relayer, nodes, MockPluginLauncher};

fn factory(commands: PluginCommands, launcher: MockPluginLauncher) -> RelayerFactory {
	RelayerFactory::new(commands, Arc::new(launcher))
}

fn unused_launcher() -> MockPluginLauncher {
	let mut launcher = MockPluginLauncher::new();
	launcher.expect_launch().never();
	launcher
}

#[tokio::test]
async fn test_embedded_relayers_skip_disabled_chains() {
	let mut disabled = chain_config(Network::EVM, "10", nodes(1));
	disabled.enabled = false;
	let configs = vec![
		chain_config(Network::EVM, "1", nodes(2)),
		disabled,
		chain_config(Network::EVM, "137", nodes(3)),
	];

	let adapters = factory(PluginCommands::new(), unused_launcher())
		.new_evm(&configs)
		.await
		.unwrap();

	let ids: Vec<String> = adapters.iter().map(|a| a.id().to_string()).collect();
	assert_eq!(ids, vec!["evm.1", "evm.137"]);

	let ctx = CancellationToken::new();
	let status = adapters[1].get_chain_status(&ctx).await.unwrap();
	assert_eq!(status.id, "137");
	let page = adapters[1].list_node_statuses(&ctx, 0, "").await.unwrap();
	assert_eq!(page.total, 3);
	assert!(page
		.statuses
		.iter()
		.all(|status| status.state == NodeState::Unused));
}

#[tokio::test]
async fn test_plugin_command_launches_plugin_relayers() {
	let mut launcher = MockPluginLauncher::new();
	launcher
		.expect_launch()
		.withf(|command, network, _, config| {
			command.to_string() == "solana-relayer --stdio"
				&& *network == Network::Solana
				&& serde_json::from_str::<ChainConfig>(config).is_ok()
		})
		.times(2)
		.returning(|_, network, chain_id, _| {
			let id = RelayerId::new(network, chain_id);
			Ok(Arc::new(healthy_relayer(&id, &["plugin-node"])) as Arc<dyn Relayer>)
		});

	let commands = PluginCommands::new().with_command(Network::Solana, "solana-relayer --stdio");
	let adapters = factory(commands, launcher)
		.new_solana(&[
			chain_config(Network::Solana, "devnet", nodes(1)),
			chain_config(Network::Solana, "mainnet", nodes(1)),
		])
		.await
		.unwrap();

	assert_eq!(adapters.len(), 2);
	let status = adapters[0]
		.get_chain_status(&CancellationToken::new())
		.await
		.unwrap();
	assert_eq!(status.network, Network::Solana);
	assert_eq!(status.id, "devnet");
}

#[tokio::test]
async fn test_plugin_only_applies_to_its_network() {
	let commands = PluginCommands::new().with_command(Network::Solana, "solana-relayer");
	let adapters = factory(commands, unused_launcher())
		.new_cosmos(&[chain_config(Network::Cosmos, "cosmoshub-4", nodes(1))])
		.await
		.unwrap();
	assert_eq!(adapters.len(), 1);
	assert_eq!(adapters[0].id().to_string(), "cosmos.cosmoshub-4");
}

#[tokio::test]
async fn test_duplicate_chain_ids_are_rejected() {
	let result = factory(PluginCommands::new(), unused_launcher())
		.new_starknet(&[
			chain_config(Network::Starknet, "SN_MAIN", nodes(1)),
			chain_config(Network::Starknet, "SN_MAIN", nodes(2)),
		])
		.await;
	match result {
		Err(RelayerError::DuplicateRelayer(id)) => assert_eq!(id.to_string(), "starknet.SN_MAIN"),
		other => panic!("unexpected result: {:?}", other),
	}
}

#[tokio::test]
async fn test_config_of_other_network_is_rejected() {
	let result = factory(PluginCommands::new(), unused_launcher())
		.new_evm(&[chain_config(Network::Solana, "devnet", nodes(1))])
		.await;
	assert!(matches!(result, Err(RelayerError::InternalError(_))));
}

#[tokio::test]
async fn test_launch_failure_is_propagated() {
	let mut launcher = MockPluginLauncher::new();
	launcher
		.expect_launch()
		.returning(|_, _, _, _| Err(RelayerError::PluginError("not found".to_string())));
	let commands = PluginCommands::new().with_command(Network::EVM, "missing-plugin");

	let result = factory(commands, launcher)
		.new_evm(&[chain_config(Network::EVM, "1", nodes(1))])
		.await;
	assert!(matches!(result, Err(RelayerError::PluginError(_))));
}
