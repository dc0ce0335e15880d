use std::{fs, path::PathBuf, time::Duration};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

use openzeppelin_chain_registry::{
	models::{Network, NodeState},
	services::relayer::{CommandPluginLauncher, PluginLauncher, RelayerError},
};

const CONFIG: &str = r#"{"network":"evm","chain_id":"1","nodes":[]}"#;

const STATUS_PLUGIN: &str = r#"
input=$(cat)
case "$input" in
	*'"method":"chain_status"'*)
		echo '{"result":{"network":"evm","id":"1","enabled":true,"config":"{}"}}' ;;
	*'"method":"node_statuses"'*)
		echo '{"result":{"statuses":[{"chain_id":"1","name":"a","url":"http://a","state":"Alive","config":"{}"}],"next_page_token":"","total":1}}' ;;
	*'"method":"start"'*|*'"method":"close"'*)
		echo '{"result":null}' ;;
	*)
		echo '{"error":"unknown method"}' ;;
esac
"#;

fn write_plugin(dir: &TempDir, body: &str) -> PathBuf {
	let path = dir.path().join("plugin.sh");
	fs::write(&path, body).unwrap();
	path
}

async fn launch(
	body: &str,
	timeout: Duration,
) -> (TempDir, std::sync::Arc<dyn openzeppelin_chain_registry::services::relayer::Relayer>) {
	launch_with_config(body, timeout, CONFIG.to_string()).await
}

async fn launch_with_config(
	body: &str,
	timeout: Duration,
	config: String,
) -> (TempDir, std::sync::Arc<dyn openzeppelin_chain_registry::services::relayer::Relayer>) {
	let dir = TempDir::new().unwrap();
	let path = write_plugin(&dir, body);
	let relayer = CommandPluginLauncher::new(timeout)
		.launch(&format!("sh {}", path.display()), Network::EVM, "1", config)
		.await
		.unwrap();
	(dir, relayer)
}

#[tokio::test]
async fn test_plugin_status_queries() {
	let (_dir, relayer) = launch(STATUS_PLUGIN, Duration::from_secs(10)).await;
	let ctx = CancellationToken::new();

	let status = relayer.get_chain_status(&ctx).await.unwrap();
	assert_eq!(status.network, Network::EVM);
	assert_eq!(status.id, "1");

	let page = relayer.list_node_statuses(&ctx, 10, "").await.unwrap();
	assert_eq!(page.total, 1);
	assert_eq!(page.statuses[0].state, NodeState::Alive);
	assert!(page.next_page_token.is_empty());
}

#[tokio::test]
async fn test_plugin_lifecycle() {
	let (_dir, relayer) = launch(STATUS_PLUGIN, Duration::from_secs(10)).await;
	assert!(matches!(
		relayer.close().await,
		Err(RelayerError::NotStarted(_))
	));
	relayer.start().await.unwrap();
	assert!(matches!(
		relayer.start().await,
		Err(RelayerError::AlreadyStarted(_))
	));
	relayer.close().await.unwrap();
}

#[tokio::test]
async fn test_failed_start_can_be_retried() {
	let (_dir, relayer) = launch("exit 1", Duration::from_secs(10)).await;
	assert!(matches!(
		relayer.start().await,
		Err(RelayerError::PluginError(_))
	));
	assert!(matches!(
		relayer.start().await,
		Err(RelayerError::PluginError(_))
	));
}

#[tokio::test]
async fn test_plugin_failures() {
	let ctx = CancellationToken::new();

	let (_dir, relayer) = launch("cat > /dev/null; echo boom >&2; exit 3", Duration::from_secs(10)).await;
	let err = relayer.get_chain_status(&ctx).await.unwrap_err();
	assert!(matches!(err, RelayerError::PluginError(_)));
	assert!(err.to_string().contains("boom"));

	let (_dir, relayer) = launch("cat > /dev/null; echo 'not json'", Duration::from_secs(10)).await;
	assert!(matches!(
		relayer.get_chain_status(&ctx).await,
		Err(RelayerError::PluginError(_))
	));

	let (_dir, relayer) = launch(
		"cat > /dev/null; echo '{\"error\":\"node offline\"}'",
		Duration::from_secs(10),
	)
	.await;
	let err = relayer.get_chain_status(&ctx).await.unwrap_err();
	assert!(err.to_string().contains("node offline"));
}

#[tokio::test]
async fn test_plugin_timeout() {
	let (_dir, relayer) = launch("sleep 5", Duration::from_millis(200)).await;
	let err = relayer
		.get_chain_status(&CancellationToken::new())
		.await
		.unwrap_err();
	assert!(err.to_string().contains("timed out"));
}

#[tokio::test]
async fn test_plugin_cancellation() {
	let (_dir, relayer) = launch("sleep 5", Duration::from_secs(10)).await;
	let ctx = CancellationToken::new();
	let cancel = ctx.clone();
	tokio::spawn(async move {
		tokio::time::sleep(Duration::from_millis(100)).await;
		cancel.cancel();
	});

	let result = tokio::time::timeout(Duration::from_secs(2), relayer.get_chain_status(&ctx))
		.await
		.expect("cancellation was not prompt");
	assert!(matches!(result, Err(RelayerError::Cancelled)));
}

#[tokio::test]
async fn test_plugin_ignoring_stdin_times_out() {
	let config = format!(
		r#"{{"network":"evm","chain_id":"1","nodes":[],"settings":{{"blob":"{}"}}}}"#,
		"x".repeat(1 << 20)
	);
	let (_dir, relayer) = launch_with_config("sleep 5", Duration::from_millis(200), config).await;

	let result = tokio::time::timeout(
		Duration::from_secs(2),
		relayer.get_chain_status(&CancellationToken::new()),
	)
	.await
	.expect("plugin request was not bounded by its timeout");
	assert!(result.unwrap_err().to_string().contains("timed out"));
}
