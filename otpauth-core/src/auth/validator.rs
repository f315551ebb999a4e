//! Code validation with replay protection
//!
//! Checks run cheapest first: the secret and the code range are checked
//! before any hashing happens, and the replay guard is only consulted once
//! the code is known to be correct.

use crate::auth::replay::ReplayGuard;
use crate::auth::{base32, hotp, totp};
use crate::config::OtpAuthConfig;
use crate::error::{ConfigError, OtpError};
use crate::types::{OtpSecret, ValidationOutcome, KEY_MODULUS, SECRET_SIZE};
use tracing::debug;

/// Validates submitted codes against a shared replay guard
///
/// One instance is meant to live for the whole process and be shared
/// between threads (it is `Send + Sync`).
#[derive(Debug)]
pub struct TotpValidator {
    guard: ReplayGuard,
    time_step_ms: u64,
    strict_secret_length: bool,
}

impl TotpValidator {
    /// Create a validator with the default 30s time step
    pub fn new(guard: ReplayGuard) -> Self {
        Self {
            guard,
            time_step_ms: totp::TIME_STEP_MS,
            strict_secret_length: false,
        }
    }

    /// Build a validator and its replay guard from configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if the configuration is invalid.
    pub fn from_config(config: &OtpAuthConfig) -> Result<Self, ConfigError> {
        config
            .validate()
            .map_err(|message| ConfigError::ValidationError { message })?;

        Ok(Self {
            guard: ReplayGuard::new(config.replay_cache_capacity, config.eviction),
            time_step_ms: config.time_step_ms,
            strict_secret_length: config.strict_secret_length,
        })
    }

    pub fn replay_guard(&self) -> &ReplayGuard {
        &self.guard
    }

    /// Validate `code` for `secret` at the current time
    ///
    /// # Errors
    ///
    /// Returns `OtpError::TimeError` if the system clock is before the epoch.
    pub fn validate_code(&self, secret: &str, code: i64) -> Result<ValidationOutcome, OtpError> {
        let now = totp::current_timestamp_ms()?;
        self.validate_code_at(secret, code, now)
    }

    /// Validate `code` for `secret` at `timestamp_ms`
    ///
    /// A malformed secret or an out-of-range code is `Failed`, not an error.
    pub fn validate_code_at(
        &self,
        secret: &str,
        code: i64,
        timestamp_ms: u64,
    ) -> Result<ValidationOutcome, OtpError> {
        if secret.trim().is_empty() {
            debug!("Rejecting validation: empty secret");
            return Ok(ValidationOutcome::Failed);
        }

        if !(1..i64::from(KEY_MODULUS)).contains(&code) {
            debug!("Rejecting validation: code out of range");
            return Ok(ValidationOutcome::Failed);
        }

        let key = match self.decode_key(secret) {
            Ok(key) => key,
            Err(e) => {
                debug!(error = %e, "Rejecting validation: unusable secret");
                return Ok(ValidationOutcome::Failed);
            }
        };

        let window = totp::time_window(timestamp_ms, self.time_step_ms);
        let expected = hotp::calculate_code(&key, window)?;
        if i64::from(expected) != code {
            debug!(window, "Code mismatch");
            return Ok(ValidationOutcome::Failed);
        }

        if self.guard.check_and_record(&key, window) {
            debug!(window, "Code accepted");
            Ok(ValidationOutcome::Success)
        } else {
            debug!(window, "Code already used in this window");
            Ok(ValidationOutcome::Duplicate)
        }
    }

    fn decode_key(&self, secret: &str) -> Result<Vec<u8>, OtpError> {
        let key = if self.strict_secret_length {
            OtpSecret::new(secret.to_string()).key_bytes_strict()?
        } else {
            base32::decode_base32(secret)?
        };

        if key.is_empty() {
            return Err(OtpError::InvalidKeyLength {
                expected: SECRET_SIZE,
                actual: 0,
            });
        }
        Ok(key)
    }
}

impl Default for TotpValidator {
    fn default() -> Self {
        Self::new(ReplayGuard::default())
    }
}
