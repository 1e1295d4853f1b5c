//! Fixed-width on-chain text encoding.
//!
//! Short strings (space names, avatars, websites, choice labels) are stored
//! on-chain as 32-byte zero-padded fields.

use crate::value::{AbiError, Result};

/// Encode text into a zero-padded 32-byte field.
///
/// Fails with [`AbiError::TextTooLong`] when the UTF-8 encoding exceeds
/// 32 bytes.
pub fn encode(text: &str) -> Result<[u8; 32]> {
    let bytes = text.as_bytes();
    if bytes.len() > 32 {
        return Err(AbiError::TextTooLong(bytes.len()));
    }
    let mut out = [0u8; 32];
    out[..bytes.len()].copy_from_slice(bytes);
    Ok(out)
}

/// Decode a 32-byte field back to text, trimming the zero padding.
pub fn decode(raw: &[u8; 32]) -> String {
    let end = raw.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    String::from_utf8_lossy(&raw[..end]).into_owned()
}
