//! Out-of-process relayers.
//!
//! A plugin is an executable invoked once per request. The request is written
//! to its stdin as a single JSON document:
//!
//! ```json
//! {"network": "evm", "config": {...}, "request": {"method": "node_statuses", "page_size": 10, "page_token": ""}}
//! ```
//!
//! and the plugin answers on stdout with either `{"result": ...}` or
//! `{"error": "..."}`. Supported methods are `start`, `close`,
//! `chain_status` and `node_statuses`.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::{process::Stdio, sync::Arc, time::Duration};
use tokio::{io::AsyncWriteExt, time::timeout};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::{
	models::{ChainStatus, Network, RelayerId},
	services::relayer::{NodeStatusPage, Relayer, RelayerError, Service, ServiceState},
};

/// Default time a plugin gets to answer a single request
pub const DEFAULT_PLUGIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds relayers backed by an external plugin command
#[async_trait]
pub trait PluginLauncher: Send + Sync {
	/// Creates a relayer for one chain instance.
	///
	/// # Arguments
	/// * `command` - Command line of the plugin executable
	/// * `network` - Protocol family of the chain
	/// * `chain_id` - Chain id of the instance
	/// * `config_json` - The chain configuration serialized as JSON
	async fn launch(
		&self,
		command: &str,
		network: Network,
		chain_id: &str,
		config_json: String,
	) -> Result<Arc<dyn Relayer>, RelayerError>;
}

/// Launches plugins as child processes speaking JSON over stdio
#[derive(Debug, Clone)]
pub struct CommandPluginLauncher {
	timeout: Duration,
}

impl CommandPluginLauncher {
	pub fn new(timeout: Duration) -> Self {
		Self { timeout }
	}
}

impl Default for CommandPluginLauncher {
	fn default() -> Self {
		Self::new(DEFAULT_PLUGIN_TIMEOUT)
	}
}

#[async_trait]
impl PluginLauncher for CommandPluginLauncher {
	async fn launch(
		&self,
		command: &str,
		network: Network,
		chain_id: &str,
		config_json: String,
	) -> Result<Arc<dyn Relayer>, RelayerError> {
		let relayer = PluginRelayer::new(
			command,
			RelayerId::new(network, chain_id),
			&config_json,
			self.timeout,
		)?;
		Ok(Arc::new(relayer))
	}
}

#[derive(Debug, Serialize)]
struct PluginRequest<'a> {
	network: Network,
	config: &'a Value,
	request: RequestBody<'a>,
}

#[derive(Debug, Serialize)]
struct RequestBody<'a> {
	method: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	page_size: Option<i32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	page_token: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct PluginResponse {
	#[serde(default)]
	result: Option<Value>,
	#[serde(default)]
	error: Option<String>,
}

/// A relayer whose queries are answered by a plugin process
pub struct PluginRelayer {
	id: RelayerId,
	program: String,
	args: Vec<String>,
	config: Value,
	timeout: Duration,
	state: ServiceState,
}

impl PluginRelayer {
	/// Creates a plugin relayer without spawning anything
	///
	/// # Errors
	/// * `PluginError` - The command is empty or the config is not valid JSON
	pub fn new(
		command: &str,
		id: RelayerId,
		config_json: &str,
		timeout: Duration,
	) -> Result<Self, RelayerError> {
		let mut parts = command.split_whitespace().map(str::to_string);
		let program = parts
			.next()
			.ok_or_else(|| RelayerError::plugin_error(format!("Empty plugin command for {}", id)))?;
		let config = serde_json::from_str(config_json).map_err(|e| {
			RelayerError::plugin_error(format!("Invalid config for plugin {}: {}", id, e))
		})?;
		Ok(Self {
			id,
			program,
			args: parts.collect(),
			config,
			timeout,
			state: ServiceState::new(),
		})
	}

	pub fn id(&self) -> &RelayerId {
		&self.id
	}

	async fn call<T: DeserializeOwned>(
		&self,
		ctx: &CancellationToken,
		method: &str,
		page_size: Option<i32>,
		page_token: Option<&str>,
	) -> Result<T, RelayerError> {
		if ctx.is_cancelled() {
			return Err(RelayerError::Cancelled);
		}
		let input = serde_json::to_vec(&PluginRequest {
			network: self.id.network,
			config: &self.config,
			request: RequestBody {
				method,
				page_size,
				page_token,
			},
		})?;

		debug!(relayer = %self.id, method, program = %self.program, "Invoking plugin");
		let mut child = tokio::process::Command::new(&self.program)
			.args(&self.args)
			.stdin(Stdio::piped())
			.stdout(Stdio::piped())
			.stderr(Stdio::piped())
			.kill_on_drop(true)
			.spawn()
			.map_err(|e| {
				RelayerError::plugin_error(format!("Failed to spawn plugin for {}: {}", self.id, e))
			})?;

		let mut stdin = child
			.stdin
			.take()
			.ok_or_else(|| RelayerError::plugin_error("Failed to get stdin handle"))?;
		let id = &self.id;
		let exchange = async move {
			stdin.write_all(&input).await.map_err(|e| {
				RelayerError::plugin_error(format!("Failed to write to plugin {}: {}", id, e))
			})?;
			drop(stdin);
			child
				.wait_with_output()
				.await
				.map_err(|e| RelayerError::plugin_error(format!("Plugin {} failed: {}", id, e)))
		};

		// Dropping `exchange` kills the child
		let output = tokio::select! {
			_ = ctx.cancelled() => return Err(RelayerError::Cancelled),
			result = timeout(self.timeout, exchange) => match result {
				Ok(output) => output?,
				Err(_) => {
					return Err(RelayerError::plugin_error(format!(
						"Plugin {} timed out after {:?} on {}",
						self.id, self.timeout, method
					)))
				}
			},
		};

		if !output.status.success() {
			let stderr = String::from_utf8_lossy(&output.stderr);
			return Err(RelayerError::plugin_error(format!(
				"Plugin {} exited with {} on {}: {}",
				self.id,
				output.status,
				method,
				stderr.trim()
			)));
		}

		let response: PluginResponse = serde_json::from_slice(&output.stdout).map_err(|e| {
			RelayerError::plugin_error(format!("Malformed output of plugin {}: {}", self.id, e))
		})?;
		if let Some(error) = response.error {
			return Err(RelayerError::plugin_error(format!(
				"Plugin {} reported: {}",
				self.id, error
			)));
		}
		serde_json::from_value(response.result.unwrap_or(Value::Null)).map_err(|e| {
			RelayerError::plugin_error(format!(
				"Unexpected {} result from plugin {}: {}",
				method, self.id, e
			))
		})
	}
}

#[async_trait]
impl Service for PluginRelayer {
	fn name(&self) -> String {
		format!("plugin relayer {}", self.id)
	}

	async fn start(&self) -> Result<(), RelayerError> {
		self.state.start_once(&self.name())?;
		let started: Result<Value, _> = self
			.call(&CancellationToken::new(), "start", None, None)
			.await;
		if let Err(e) = started {
			self.state.reset();
			return Err(e);
		}
		info!(relayer = %self.id, program = %self.program, "Plugin relayer started");
		Ok(())
	}

	async fn close(&self) -> Result<(), RelayerError> {
		self.state.stop_once(&self.name())?;
		let _: Value = self
			.call(&CancellationToken::new(), "close", None, None)
			.await?;
		info!(relayer = %self.id, "Plugin relayer closed");
		Ok(())
	}
}

#[async_trait]
impl Relayer for PluginRelayer {
	async fn get_chain_status(&self, ctx: &CancellationToken) -> Result<ChainStatus, RelayerError> {
		self.call(ctx, "chain_status", None, None).await
	}

	async fn list_node_statuses(
		&self,
		ctx: &CancellationToken,
		page_size: i32,
		page_token: &str,
	) -> Result<NodeStatusPage, RelayerError> {
		self.call(ctx, "node_statuses", Some(page_size), Some(page_token))
			.await
	}
}
