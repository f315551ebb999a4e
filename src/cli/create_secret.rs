//! Create-secret command implementation

use otpauth_core::create_secret;
use otpauth_core::error::OtpAuthError;

/// Run the create-secret command
///
/// Prints only the Base32 secret to stdout so the output can be piped into
/// an enrollment step. A failing randomness source is fatal.
pub fn run_create_secret() -> Result<(), OtpAuthError> {
    let secret = create_secret()?;
    println!("{}", secret.expose());
    Ok(())
}
