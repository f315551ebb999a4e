//! TOTP (Time-based One-Time Password) support
//!
//! Implements RFC 6238 on top of the HOTP calculation: the counter is the
//! number of whole time steps elapsed since the Unix epoch.

use crate::auth::hotp;
use crate::error::OtpError;
use crate::types::{OtpSecret, TotpCode};
use std::time::{SystemTime, UNIX_EPOCH};

/// Length of one time window in milliseconds (RFC 6238 default of 30s)
pub const TIME_STEP_MS: u64 = 30_000;

/// Derive the time window (HOTP counter) for a millisecond timestamp
///
/// A zero step is treated as the default step rather than dividing by zero;
/// configuration validation rejects it before it gets here.
pub fn time_window(timestamp_ms: u64, step_ms: u64) -> u64 {
    let step = if step_ms == 0 { TIME_STEP_MS } else { step_ms };
    timestamp_ms / step
}

/// Current wall-clock time in milliseconds since the Unix epoch
pub fn current_timestamp_ms() -> Result<u64, OtpError> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| OtpError::TimeError)?;
    u64::try_from(elapsed.as_millis()).map_err(|_| OtpError::TimeError)
}

/// Generate the code for a secret at `timestamp_ms`, or now if `None`
///
/// # Errors
///
/// Returns an error if:
/// - The secret is not valid Base32
/// - The secret decodes to no key bytes
/// - The system clock is before the Unix epoch
pub fn generate_code(secret: &OtpSecret, timestamp_ms: Option<u64>) -> Result<TotpCode, OtpError> {
    let key = secret.key_bytes()?;
    let timestamp_ms = match timestamp_ms {
        Some(ts) => ts,
        None => current_timestamp_ms()?,
    };

    let code = hotp::calculate_code(&key, time_window(timestamp_ms, TIME_STEP_MS))?;
    Ok(TotpCode::from_value(code))
}

/// Milliseconds left before the window containing `timestamp_ms` closes
pub fn remaining_ms(timestamp_ms: u64) -> u64 {
    TIME_STEP_MS - (timestamp_ms % TIME_STEP_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RFC6238_SECRET: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";

    #[test]
    fn test_time_window_boundaries() {
        assert_eq!(time_window(0, TIME_STEP_MS), 0);
        assert_eq!(time_window(29_999, TIME_STEP_MS), 0);
        assert_eq!(time_window(30_000, TIME_STEP_MS), 1);
        assert_eq!(time_window(59_000, TIME_STEP_MS), 1);
    }

    #[test]
    fn test_time_window_zero_step_uses_default() {
        assert_eq!(time_window(60_000, 0), 2);
    }

    #[test]
    fn test_generate_code_rfc6238_vector() {
        // RFC 6238 SHA1 vector at T=59s is 94287082; last six digits
        let secret = OtpSecret::new(RFC6238_SECRET.to_string());
        let code = generate_code(&secret, Some(59_000)).unwrap();
        assert_eq!(code.expose(), "287082");
    }

    #[test]
    fn test_generate_code_keeps_leading_zero() {
        // RFC 6238 SHA1 vector at T=1234567890s is 89005924
        let secret = OtpSecret::new(RFC6238_SECRET.to_string());
        let code = generate_code(&secret, Some(1_234_567_890_000)).unwrap();
        assert_eq!(code.expose(), "005924");
    }

    #[test]
    fn test_generate_code_now() {
        let secret = OtpSecret::new("JBSWY3DPEHPK3PXP".to_string());
        let code = generate_code(&secret, None).unwrap();
        assert_eq!(code.expose().len(), 6);
        assert!(code.expose().chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_generate_code_invalid_secret() {
        let secret = OtpSecret::new("INVALID!".to_string());
        assert!(matches!(
            generate_code(&secret, Some(0)),
            Err(OtpError::InvalidBase32)
        ));
    }

    #[test]
    fn test_remaining_ms() {
        assert_eq!(remaining_ms(0), 30_000);
        assert_eq!(remaining_ms(29_000), 1_000);
        assert_eq!(remaining_ms(30_001), 29_999);
    }
}
