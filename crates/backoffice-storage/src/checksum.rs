//! Checksum normalization.
//!
//! Clients compute the SHA-256 digest in the browser and send it hex-encoded;
//! S3 expects `x-amz-checksum-sha256` as base64 of the raw digest.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Length of a hex-encoded SHA-256 digest.
pub const SHA256_HEX_LEN: usize = 64;

/// Convert a hex SHA-256 digest to the base64 form the storage provider checks.
///
/// Returns `None` unless the input is exactly 64 hex characters (either case).
pub fn sha256_hex_to_base64(checksum: &str) -> Option<String> {
    if checksum.len() != SHA256_HEX_LEN {
        return None;
    }
    let digest = hex::decode(checksum).ok()?;
    Some(STANDARD.encode(digest))
}
