//! Type definitions and wrappers for secure data handling
//!
//! Secrets and generated codes are wrapped with the secrecy crate so they
//! never show up in logs or debug output.

use crate::auth::base32;
use crate::error::OtpError;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of random bytes in a shared secret (160 bits, the HMAC-SHA1 output size)
pub const SECRET_SIZE: usize = 20;

/// Modulus applied to the truncated HMAC value (6 decimal digits)
pub const KEY_MODULUS: u32 = 1_000_000;

/// Number of digits a code is rendered with
pub const CODE_DIGITS: usize = 6;

/// Base32-encoded TOTP shared secret
///
/// The `Debug` output is redacted, so the secret can travel through
/// structures that get logged without leaking.
#[derive(Clone, Debug)]
pub struct OtpSecret(Secret<String>);

impl OtpSecret {
    /// Create a new OtpSecret from a Base32-encoded string
    pub fn new(secret: String) -> Self {
        Self(Secret::new(secret))
    }

    /// Expose the encoded secret (use with caution!)
    ///
    /// Only meant for handing the secret to the user during enrollment or
    /// to a storage collaborator.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Decode the secret into raw HMAC key bytes
    pub fn key_bytes(&self) -> Result<Vec<u8>, OtpError> {
        base32::decode_base32(self.expose())
    }

    /// Decode the secret and require exactly `SECRET_SIZE` bytes
    pub fn key_bytes_strict(&self) -> Result<Vec<u8>, OtpError> {
        let key = self.key_bytes()?;
        if key.len() != SECRET_SIZE {
            return Err(OtpError::InvalidKeyLength {
                expected: SECRET_SIZE,
                actual: key.len(),
            });
        }
        Ok(key)
    }
}

impl From<String> for OtpSecret {
    fn from(secret: String) -> Self {
        Self::new(secret)
    }
}

/// A generated one-time code, zero-padded to `CODE_DIGITS`
///
/// Codes are short-lived but still credentials, so they get the same
/// treatment as secrets.
#[derive(Clone, Debug)]
pub struct TotpCode(Secret<String>);

impl TotpCode {
    /// Render a numeric code with leading zeros
    pub fn from_value(value: u32) -> Self {
        Self(Secret::new(format!("{:0width$}", value, width = CODE_DIGITS)))
    }

    /// Expose the code (use with caution!)
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

/// Parse a code typed by a user into its numeric value
///
/// Spaces and dashes between digits are ignored ("123 456", "123-456"); a
/// leading `-` is a sign. The range check against `KEY_MODULUS` is left to
/// the validator, so values too large for `i64` saturate instead of failing.
pub fn parse_code(input: &str) -> Result<i64, OtpError> {
    let trimmed = input.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let digits: String = body
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(OtpError::InvalidCode(
            "code must contain only digits".to_string(),
        ));
    }

    // All-digit input only fails to parse on overflow
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Ok(if negative { -magnitude } else { magnitude })
}

/// Result of validating a submitted code
///
/// `Duplicate` means the code was correct but had already been accepted for
/// the same secret and time window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationOutcome {
    Success,
    Failed,
    Duplicate,
}

impl ValidationOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Duplicate => "duplicate",
        };
        f.write_str(label)
    }
}
