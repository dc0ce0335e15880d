use serde::{Deserialize, Serialize};

/// A single RPC endpoint of a chain
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub struct Node {
	pub name: String,
	pub url: String,
}

impl Node {
	pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			url: url.into(),
		}
	}
}
