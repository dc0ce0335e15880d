use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use openzeppelin_chain_registry::{
	bootstrap::{close_services, create_init_fns, initialize_registry, start_services},
	models::{Network, RelayerId},
	services::relayer::{PluginCommands, RelayerError, RelayerFactory},
};

use crate::integration::mocks::{chain_config, nodes, MockPluginLauncher};

fn launcher() -> Arc<MockPluginLauncher> {
	let mut launcher = MockPluginLauncher::new();
	launcher.expect_launch().never();
	Arc::new(launcher)
}

#[tokio::test]
async fn test_init_fns_follow_network_order() {
	let factory = Arc::new(RelayerFactory::new(PluginCommands::new(), launcher()));
	let init_fns = create_init_fns(
		vec![
			chain_config(Network::Starknet, "SN_MAIN", nodes(1)),
			chain_config(Network::EVM, "1", nodes(1)),
			chain_config(Network::Starknet, "SN_SEPOLIA", nodes(1)),
		],
		factory,
	);
	let networks: Vec<Network> = init_fns.iter().map(|init_fn| init_fn.network()).collect();
	assert_eq!(networks, vec![Network::EVM, Network::Starknet]);
}

#[tokio::test]
async fn test_initialize_registry() {
	let mut disabled = chain_config(Network::Solana, "testnet", nodes(1));
	disabled.enabled = false;
	let registry = initialize_registry(
		vec![
			chain_config(Network::Cosmos, "cosmoshub-4", nodes(2)),
			chain_config(Network::EVM, "1", nodes(1)),
			disabled,
			chain_config(Network::Solana, "devnet", nodes(1)),
		],
		PluginCommands::new(),
		launcher(),
	)
	.await
	.unwrap();

	assert_eq!(registry.len().await, 3);
	assert!(registry
		.get(&RelayerId::new(Network::Solana, "testnet"))
		.await
		.is_err());

	let names: Vec<String> = registry
		.services()
		.await
		.iter()
		.map(|service| service.name())
		.collect();
	assert_eq!(
		names,
		vec![
			"relayer evm.1",
			"relayer solana.devnet",
			"relayer cosmos.cosmoshub-4"
		]
	);

	let (statuses, count) = registry
		.chain_statuses(&CancellationToken::new(), 0, 0)
		.await
		.unwrap();
	assert_eq!(count, 3);
	assert_eq!(statuses[0].id, "cosmoshub-4");
}

#[tokio::test]
async fn test_duplicate_configs_fail_initialization() {
	let result = initialize_registry(
		vec![
			chain_config(Network::EVM, "1", nodes(1)),
			chain_config(Network::EVM, "1", nodes(2)),
		],
		PluginCommands::new(),
		launcher(),
	)
	.await;
	assert!(matches!(result, Err(RelayerError::InitError { .. })));
}

#[tokio::test]
async fn test_service_lifecycle() {
	let registry = initialize_registry(
		vec![
			chain_config(Network::EVM, "1", nodes(1)),
			chain_config(Network::EVM, "137", nodes(1)),
		],
		PluginCommands::new(),
		launcher(),
	)
	.await
	.unwrap();

	let services = registry.services().await;
	let started = start_services(&services).await.unwrap();
	assert_eq!(started.len(), 2);

	assert!(matches!(
		start_services(&services).await,
		Err(RelayerError::AlreadyStarted(_))
	));

	close_services(&started).await;
	for service in &services {
		assert!(matches!(
			service.close().await,
			Err(RelayerError::NotStarted(_))
		));
	}
}
