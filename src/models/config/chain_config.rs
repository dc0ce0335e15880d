use std::{collections::HashSet, path::Path};

use url::Url;

use crate::models::{ChainConfig, ConfigLoader};

use super::error::ConfigError;

/// Directory searched when no explicit chains directory is given
const DEFAULT_CHAINS_DIR: &str = "config/chains";

/// Lowest accepted per-request timeout
const MIN_REQUEST_TIMEOUT_MS: u64 = 100;

impl ConfigLoader for ChainConfig {
	fn load_all<T>(path: Option<&Path>) -> Result<T, ConfigError>
	where
		T: FromIterator<(String, Self)>,
	{
		let chains_dir = path.unwrap_or(Path::new(DEFAULT_CHAINS_DIR));
		if !chains_dir.exists() {
			return Err(ConfigError::file_error(format!(
				"chains directory not found: {}",
				chains_dir.display()
			)));
		}

		let mut entries = std::fs::read_dir(chains_dir)?
			.map(|entry| entry.map(|e| e.path()))
			.collect::<Result<Vec<_>, _>>()?;
		// Directory order is platform dependent
		entries.sort();

		let mut pairs = Vec::new();
		for path in entries {
			if !Self::is_json_file(&path) {
				continue;
			}

			let name = path
				.file_stem()
				.and_then(|s| s.to_str())
				.unwrap_or("unknown")
				.to_string();

			let config = Self::load_from_path(&path).map_err(|e| {
				ConfigError::parse_error(format!("{}: {}", path.display(), e))
			})?;
			pairs.push((name, config));
		}

		Ok(T::from_iter(pairs))
	}

	fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
		let file = std::fs::File::open(path)?;
		let config: ChainConfig = serde_json::from_reader(file)?;

		if let Err(validation_error) = config.validate() {
			return Err(ConfigError::validation_error(validation_error));
		}

		Ok(config)
	}

	fn validate(&self) -> Result<(), String> {
		if self.chain_id.trim().is_empty() {
			return Err("chain_id must not be empty".to_string());
		}

		let mut names = HashSet::new();
		let mut urls = HashSet::new();
		for node in &self.nodes {
			if node.name.trim().is_empty() {
				return Err("Node names must not be empty".to_string());
			}
			if !(node.url.starts_with("http://") || node.url.starts_with("https://")) {
				return Err(format!(
					"Node {} URL must start with http:// or https://",
					node.name
				));
			}
			if Url::parse(&node.url).is_err() {
				return Err(format!("Node {} has an invalid URL: {}", node.name, node.url));
			}
			if !names.insert(node.name.as_str()) {
				return Err(format!("Duplicate node name: {}", node.name));
			}
			if !urls.insert(node.url.as_str()) {
				return Err(format!("Duplicate node URL: {}", node.url));
			}
		}

		if self.request_timeout_ms < MIN_REQUEST_TIMEOUT_MS {
			return Err(format!(
				"request_timeout_ms must be at least {}ms",
				MIN_REQUEST_TIMEOUT_MS
			));
		}

		Ok(())
	}
}
