//! Shared secret generation for enrollment

use crate::auth::base32::encode_base32;
use crate::error::OtpError;
use crate::types::{OtpSecret, SECRET_SIZE};
use rand::rngs::OsRng;
use rand::RngCore;
use secrecy::zeroize::Zeroize;

/// Create a new random shared secret
///
/// Draws `SECRET_SIZE` bytes from the operating system CSPRNG and returns
/// them Base32-encoded.
///
/// # Errors
///
/// Returns `OtpError::RandomSourceUnavailable` if the OS randomness source
/// fails. Callers must not fall back to a weaker source.
pub fn create_secret() -> Result<OtpSecret, OtpError> {
    let mut buffer = [0u8; SECRET_SIZE];
    OsRng
        .try_fill_bytes(&mut buffer)
        .map_err(|_| OtpError::RandomSourceUnavailable)?;

    let secret = OtpSecret::new(encode_base32(&buffer));
    buffer.zeroize();
    Ok(secret)
}
