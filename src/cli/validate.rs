//! Validate command implementation

use colored::Colorize;
use otpauth_core::config::toml_config::{load_config, load_config_from_path};
use otpauth_core::error::OtpAuthError;
use otpauth_core::types::parse_code;
use otpauth_core::{TotpValidator, ValidationOutcome};
use std::io::IsTerminal;
use std::path::Path;
use tracing::debug;

/// Run the validate command
///
/// Prints the outcome to stdout. The replay guard only lives for this
/// process, so a duplicate can only be reported by long-running callers of
/// the library.
pub fn run_validate(
    config_path: Option<&Path>,
    secret: &str,
    code: &str,
    timestamp: Option<u64>,
) -> Result<ValidationOutcome, OtpAuthError> {
    let config = match config_path {
        Some(path) => load_config_from_path(path)?,
        None => load_config()?,
    };
    let validator = TotpValidator::from_config(&config)?;

    let code = parse_code(code)?;
    let outcome = match timestamp {
        Some(ts) => validator.validate_code_at(secret, code, ts)?,
        None => validator.validate_code(secret, code)?,
    };
    debug!(%outcome, "Validation finished");

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let label = match outcome {
        ValidationOutcome::Success => outcome.to_string().green().bold(),
        ValidationOutcome::Failed => outcome.to_string().red().bold(),
        ValidationOutcome::Duplicate => outcome.to_string().yellow().bold(),
    };
    println!("{}", label);

    Ok(outcome)
}
