//! Relayers and their construction.
//!
//! A relayer exposes the status of one chain instance behind the uniform
//! [`Relayer`] trait, whether it runs embedded over a [`Chain`](crate::services::blockchain::Chain)
//! or as an external plugin process.

mod adapter;
mod chain_relayer;
mod error;
mod factory;
mod pagination;
mod plugin;
mod relayer;
mod service;

pub use adapter::RelayerAdapter;
pub use chain_relayer::ChainRelayer;
pub use error::RelayerError;
pub use factory::{PluginCommands, RelayerFactory};
pub use pagination::{decode_page_token, encode_page_token, page_range, paginate};
pub use plugin::{CommandPluginLauncher, PluginLauncher, PluginRelayer, DEFAULT_PLUGIN_TIMEOUT};
pub use relayer::{NodeStatusPage, Relayer};
pub use service::{Service, ServiceState};
