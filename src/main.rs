//! Chain registry service entry point.
//!
//! # Flow
//! 1. Loads chain configurations from the config directory
//! 2. Builds a relayer for every enabled chain and registers it
//! 3. Starts the relayer services and logs the chain statuses
//! 4. Closes the services in reverse order on Ctrl+C

use clap::{Arg, Command};
use dotenvy::dotenv;
use std::{
	collections::BTreeMap,
	env::{set_var, var},
	path::PathBuf,
	sync::Arc,
};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use openzeppelin_chain_registry::{
	bootstrap::{close_services, initialize_registry, start_services},
	models::{ChainConfig, ConfigLoader},
	services::relayer::{CommandPluginLauncher, PluginCommands},
	utils::logging::setup_logging,
};

/// Main entry point for the chain registry service.
///
/// # Errors
/// Returns an error if configuration loading or registry construction fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let matches = Command::new("openzeppelin-chain-registry")
		.version(env!("CARGO_PKG_VERSION"))
		.about(
			"Keeps a verified RPC endpoint per configured chain and reports chain and node \
			 statuses across EVM, Solana, Cosmos and Starknet networks.",
		)
		.arg(
			Arg::new("log-level")
				.long("log-level")
				.help("Set log level (trace, debug, info, warn, error)")
				.value_name("LEVEL"),
		)
		.arg(
			Arg::new("config-path")
				.long("config-path")
				.help("Directory of chain configuration files (default: config/chains)")
				.value_name("PATH"),
		)
		.get_matches();

	dotenv().ok();

	// CLI options only apply when the environment does not already set them
	if let Some(level) = matches.get_one::<String>("log-level") {
		if var("LOG_LEVEL").is_err() {
			set_var("LOG_LEVEL", level);
		}
	}

	setup_logging().unwrap_or_else(|e| {
		error!("Failed to setup logging: {}", e);
	});

	let config_path = matches.get_one::<String>("config-path").map(PathBuf::from);
	let configs: BTreeMap<String, ChainConfig> = ChainConfig::load_all(config_path.as_deref())
		.map_err(|e| anyhow::anyhow!("Failed to load chain configurations: {}", e))?;
	info!(chains = configs.len(), "Loaded chain configurations");

	let registry = initialize_registry(
		configs.into_values(),
		PluginCommands::from_env(),
		Arc::new(CommandPluginLauncher::default()),
	)
	.await
	.map_err(|e| anyhow::anyhow!("Failed to initialize registry: {}", e))?;

	if registry.is_empty().await {
		info!("No enabled chains configured. Exiting...");
		return Ok(());
	}

	let services = start_services(&registry.services().await).await?;

	let ctx = CancellationToken::new();
	match registry.chain_statuses(&ctx, 0, 0).await {
		Ok((statuses, count)) => {
			info!(count, "Chain statuses");
			for status in statuses {
				info!(network = %status.network, chain_id = %status.id, enabled = status.enabled, "Chain");
			}
		}
		Err(e) => error!(error = %e, "Failed to query chain statuses"),
	}

	info!("Service started. Press Ctrl+C to shutdown");
	if let Err(e) = tokio::signal::ctrl_c().await {
		error!("Error waiting for Ctrl+C: {}", e);
	}
	info!("Shutdown signal received, stopping services...");

	ctx.cancel();
	close_services(&services).await;

	info!("Shutdown complete");
	Ok(())
}
