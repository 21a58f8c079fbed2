//! Text-safe container for QTL bytes.
//!
//! A payload is the header line `QTLEAF1` followed by the standard, padded
//! base64 rendering of the leaf records.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;

use crate::node::error::PayloadError;

pub const HEADER: &str = "QTLEAF1\n";

/// Wraps QTL bytes into a payload string.
pub fn to_payload(bytes: &[u8]) -> String {
	let mut ret = String::with_capacity(HEADER.len() + bytes.len().div_ceil(3) * 4);
	ret.push_str(HEADER);
	BASE64_STANDARD.encode_string(bytes, &mut ret);
	ret
}

/// Extracts the QTL bytes from a payload string.
///
/// Trailing whitespace after the body is ignored.
pub fn from_payload(source: &str) -> Result<Vec<u8>, PayloadError> {
	let body = source.strip_prefix(HEADER).ok_or(PayloadError::NotAContainer)?;
	Ok(BASE64_STANDARD.decode(body.trim_end())?)
}
