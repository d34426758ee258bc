//! Base64 encoding for embedding bytes in shell text.

use crate::error::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Encode bytes as standard, padded base64.
///
/// The alphabet (`A-Z a-z 0-9 + / =`) never needs escaping inside single
/// quotes, and the output is a single line.
pub fn encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decode text produced by [`encode`].
pub fn decode(text: &str) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(text)?)
}
