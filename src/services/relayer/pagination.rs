//! Page tokens and offset/limit paging.
//!
//! Node status page tokens are opaque to callers: base64 of the decimal
//! index of the first item of the page. An empty token is the first page and
//! an empty next token marks the last page.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::ops::Range;

use crate::services::relayer::RelayerError;

pub fn encode_page_token(start: usize) -> String {
	STANDARD.encode(start.to_string())
}

pub fn decode_page_token(token: &str) -> Result<usize, RelayerError> {
	if token.is_empty() {
		return Ok(0);
	}
	let bytes = STANDARD
		.decode(token)
		.map_err(|_| RelayerError::InvalidPageToken(token.to_string()))?;
	String::from_utf8(bytes)
		.ok()
		.and_then(|s| s.parse::<usize>().ok())
		.ok_or_else(|| RelayerError::InvalidPageToken(token.to_string()))
}

/// Resolves the item range of a page and the token of the next one.
///
/// `page_size <= 0` returns everything from the token on.
pub fn page_range(
	total: usize,
	page_size: i32,
	page_token: &str,
) -> Result<(Range<usize>, String), RelayerError> {
	let start = decode_page_token(page_token)?.min(total);
	let end = if page_size > 0 {
		start.saturating_add(page_size as usize).min(total)
	} else {
		total
	};
	let next = if end < total {
		encode_page_token(end)
	} else {
		String::new()
	};
	Ok((start..end, next))
}

/// Applies offset/limit paging; `limit <= 0` means no limit
pub fn paginate<T>(items: Vec<T>, offset: usize, limit: i64) -> Vec<T> {
	let iter = items.into_iter().skip(offset);
	if limit > 0 {
		iter.take(limit as usize).collect()
	} else {
		iter.collect()
	}
}
