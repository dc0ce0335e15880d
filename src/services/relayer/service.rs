//! Lifecycle of relayer services.
//!
//! The registry hands the list of services to the application, which starts
//! and closes them. Each service may be started once and closed once.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::services::relayer::RelayerError;

/// A startable and stoppable component managed by the application
#[async_trait]
pub trait Service: Send + Sync {
	fn name(&self) -> String;

	async fn start(&self) -> Result<(), RelayerError>;

	async fn close(&self) -> Result<(), RelayerError>;
}

const UNSTARTED: u8 = 0;
const STARTED: u8 = 1;
const STOPPED: u8 = 2;

/// Start-once / stop-once state shared by service implementations
#[derive(Debug, Default)]
pub struct ServiceState(AtomicU8);

impl ServiceState {
	pub fn new() -> Self {
		Self(AtomicU8::new(UNSTARTED))
	}

	/// Transitions to started, failing if the service was ever started
	pub fn start_once(&self, name: &str) -> Result<(), RelayerError> {
		self.0
			.compare_exchange(UNSTARTED, STARTED, Ordering::SeqCst, Ordering::SeqCst)
			.map(|_| ())
			.map_err(|_| RelayerError::AlreadyStarted(name.to_string()))
	}

	/// Transitions to stopped, failing if the service is not running
	pub fn stop_once(&self, name: &str) -> Result<(), RelayerError> {
		self.0
			.compare_exchange(STARTED, STOPPED, Ordering::SeqCst, Ordering::SeqCst)
			.map(|_| ())
			.map_err(|_| RelayerError::NotStarted(name.to_string()))
	}

	/// Returns to unstarted after a failed start
	pub fn reset(&self) {
		let _ = self
			.0
			.compare_exchange(STARTED, UNSTARTED, Ordering::SeqCst, Ordering::SeqCst);
	}

	pub fn is_running(&self) -> bool {
		self.0.load(Ordering::SeqCst) == STARTED
	}
}
