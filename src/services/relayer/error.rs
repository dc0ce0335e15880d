//! Relayer and registry error types.

use log::error;
use thiserror::Error;

use crate::{
	models::{Network, RelayerId},
	services::blockchain::BlockChainError,
};

/// Represents possible errors during relayer construction and queries
#[derive(Debug, Error)]
pub enum RelayerError {
	/// No relayer is registered under the id
	#[error("Relayer {0} does not exist")]
	NoSuchRelayer(RelayerId),

	/// Two relayers were built for the same id
	#[error("Duplicate relayer {0}")]
	DuplicateRelayer(RelayerId),

	/// Errors of several sub-queries, in query order
	#[error("{}", join_messages(.0))]
	Aggregate(Vec<RelayerError>),

	/// The caller cancelled the operation
	#[error("Operation cancelled")]
	Cancelled,

	/// A node status page token could not be decoded
	#[error("Invalid page token: {0}")]
	InvalidPageToken(String),

	/// Lifecycle errors
	#[error("{0} has already been started")]
	AlreadyStarted(String),

	#[error("{0} is not running")]
	NotStarted(String),

	/// Errors reported by an out-of-process plugin
	#[error("Plugin error: {0}")]
	PluginError(String),

	/// Building the relayers of a protocol family failed
	#[error("Failed to initialize {network} relayers: {source}")]
	InitError {
		network: Network,
		#[source]
		source: Box<RelayerError>,
	},

	#[error(transparent)]
	BlockChain(#[from] BlockChainError),

	#[error("Internal error: {0}")]
	InternalError(String),
}

fn join_messages(errors: &[RelayerError]) -> String {
	errors
		.iter()
		.map(|e| e.to_string())
		.collect::<Vec<_>>()
		.join("; ")
}

impl RelayerError {
	/// Combines the errors of an all-or-nothing aggregation
	pub fn aggregate(errors: Vec<RelayerError>) -> Self {
		let error = Self::Aggregate(errors);
		error!("{}", error);
		error
	}

	/// Wraps a construction error with the failing protocol family
	pub fn init_error(network: Network, source: RelayerError) -> Self {
		let error = Self::InitError {
			network,
			source: Box::new(source),
		};
		error!("{}", error);
		error
	}

	/// Creates a new plugin error with logging
	pub fn plugin_error(msg: impl Into<String>) -> Self {
		let error = Self::PluginError(msg.into());
		error!("{}", error);
		error
	}

	/// Creates a new page token error with logging
	pub fn invalid_page_token(token: impl Into<String>) -> Self {
		let error = Self::InvalidPageToken(token.into());
		error!("{}", error);
		error
	}

	/// Creates a new internal error with logging
	pub fn internal_error(msg: impl Into<String>) -> Self {
		let error = Self::InternalError(msg.into());
		error!("{}", error);
		error
	}

	/// Sub-errors of an aggregate, or the error itself
	pub fn errors(&self) -> Vec<&RelayerError> {
		match self {
			Self::Aggregate(errors) => errors.iter().collect(),
			other => vec![other],
		}
	}

	pub fn is_cancelled(&self) -> bool {
		matches!(self, Self::Cancelled)
	}
}

impl From<serde_json::Error> for RelayerError {
	fn from(err: serde_json::Error) -> Self {
		Self::internal_error(format!("Serialization failed: {}", err))
	}
}
