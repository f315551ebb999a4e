//! Code command implementation

use colored::Colorize;
use otpauth_core::auth::totp;
use otpauth_core::error::OtpAuthError;
use otpauth_core::OtpSecret;
use std::io::IsTerminal;

/// Run the code command
///
/// The code goes to stdout (machine-parsable); the time left in the current
/// window goes to stderr.
pub fn run_code(secret: String, timestamp: Option<u64>) -> Result<(), OtpAuthError> {
    let secret = OtpSecret::new(secret);
    let timestamp = match timestamp {
        Some(ts) => ts,
        None => totp::current_timestamp_ms()?,
    };

    let code = totp::generate_code(&secret, Some(timestamp))?;
    println!("{}", code.expose());

    if !std::io::stderr().is_terminal() {
        colored::control::set_override(false);
    }
    let remaining_secs = totp::remaining_ms(timestamp).div_ceil(1000);
    eprintln!("{}", format!("valid for {}s", remaining_secs).dimmed());
    Ok(())
}
