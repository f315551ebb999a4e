//! HOTP code calculation (RFC 4226)
//!
//! A pure function of key bytes and counter. The TOTP layer feeds it the
//! time window as the counter.

use crate::auth::hmac::{hmac_sha1, DIGEST_SIZE};
use crate::error::OtpError;
use crate::types::KEY_MODULUS;

/// Dynamic truncation (RFC 4226, section 5.3)
///
/// The low nibble of the last byte selects a 4-byte slice, which is read
/// big-endian with the top bit cleared.
pub fn truncate(digest: &[u8; DIGEST_SIZE]) -> u32 {
    let offset = (digest[DIGEST_SIZE - 1] & 0x0f) as usize;
    u32::from_be_bytes([
        digest[offset] & 0x7f,
        digest[offset + 1],
        digest[offset + 2],
        digest[offset + 3],
    ])
}

/// Calculate the 6-digit code for `key` at `counter`
///
/// # Errors
///
/// Returns `OtpError::EmptyKey` when there is no key material to hash.
pub fn calculate_code(key: &[u8], counter: u64) -> Result<u32, OtpError> {
    let digest = hmac_sha1(key, &counter.to_be_bytes())?;
    Ok(truncate(&digest) % KEY_MODULUS)
}
