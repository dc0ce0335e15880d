//! Logging utilities for the application
//!
//! Logging is set up with `tracing_subscriber`. The filter comes from
//! `RUST_LOG`, then `LOG_LEVEL`, and defaults to `info`.
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Level used when neither `RUST_LOG` nor `LOG_LEVEL` is usable
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Setup logging for the application, writing to stdout
pub fn setup_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
	setup_logging_with_writer(std::io::stdout)?;
	Ok(())
}

/// Setup logging for the application with a custom writer
pub fn setup_logging_with_writer<W>(
	writer: W,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>
where
	W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
	let filter = build_filter(
		std::env::var("RUST_LOG").ok().as_deref(),
		std::env::var("LOG_LEVEL").ok().as_deref(),
	);

	tracing_subscriber::registry()
		.with(filter)
		.with(
			fmt::layer()
				.with_writer(writer)
				.event_format(
					fmt::format()
						.with_level(true)
						.with_target(true)
						.with_thread_ids(false)
						.with_thread_names(false)
						.with_ansi(true)
						.compact(),
				)
				.fmt_fields(fmt::format::PrettyFields::new()),
		)
		.try_init()?;
	Ok(())
}

/// Picks the first valid directive of `rust_log` and `log_level`
fn build_filter(rust_log: Option<&str>, log_level: Option<&str>) -> EnvFilter {
	[rust_log, log_level]
		.into_iter()
		.flatten()
		.map(str::trim)
		.filter(|directive| !directive.is_empty())
		.find_map(|directive| EnvFilter::try_new(directive).ok())
		.unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL))
}
