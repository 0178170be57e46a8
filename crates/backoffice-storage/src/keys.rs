//! Destination key generation for uploads.
//!
//! Keys are 32 random bytes from the thread-local CSPRNG rendered as lowercase
//! hex, stored at the bucket root. They never depend on request input.

use rand::RngCore;

/// Number of random bytes behind each key (256 bits).
pub const UPLOAD_KEY_BYTES: usize = 32;

/// Generate a fresh, unguessable destination key.
pub fn generate_upload_key() -> String {
    let mut bytes = [0u8; UPLOAD_KEY_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
