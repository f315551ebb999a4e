//! HMAC-SHA1 keyed hash (RFC 2104)
//!
//! Block size: 64 bytes for SHA-1
//! Inner pad (ipad): 0x36
//! Outer pad (opad): 0x5C
//!
//! Reference: https://www.ietf.org/rfc/rfc2104.txt

use crate::error::OtpError;
use sha1::{Digest, Sha1};

const BLOCK_SIZE: usize = 64;
const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5C;

/// Length in bytes of an HMAC-SHA1 tag
pub const DIGEST_SIZE: usize = 20;

/// Compute HMAC-SHA1 over `message` with `key`
///
/// Keys longer than the block size are hashed first, shorter keys are
/// zero-padded. An empty key is rejected as unusable key material.
pub fn hmac_sha1(key: &[u8], message: &[u8]) -> Result<[u8; DIGEST_SIZE], OtpError> {
    if key.is_empty() {
        return Err(OtpError::EmptyKey);
    }

    let mut key_block = [0u8; BLOCK_SIZE];
    if key.len() > BLOCK_SIZE {
        let hashed = Sha1::digest(key);
        key_block[..DIGEST_SIZE].copy_from_slice(&hashed);
    } else {
        key_block[..key.len()].copy_from_slice(key);
    }

    let mut ipad_key = [0u8; BLOCK_SIZE];
    let mut opad_key = [0u8; BLOCK_SIZE];
    for (i, byte) in key_block.iter().enumerate() {
        ipad_key[i] = byte ^ IPAD;
        opad_key[i] = byte ^ OPAD;
    }

    let mut inner = Sha1::new();
    inner.update(ipad_key);
    inner.update(message);
    let inner_hash = inner.finalize();

    let mut outer = Sha1::new();
    outer.update(opad_key);
    outer.update(inner_hash);

    let mut tag = [0u8; DIGEST_SIZE];
    tag.copy_from_slice(&outer.finalize());
    Ok(tag)
}
