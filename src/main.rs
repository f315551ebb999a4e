//! otpauth - TOTP second-factor CLI
//!
//! Creates shared secrets, prints the current one-time code for a secret
//! and validates submitted codes.

use clap::{Parser, Subcommand};
use otpauth_core::error::OtpAuthError;
use otpauth_core::{init_logging, ValidationOutcome};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "otpauth")]
#[command(about = "Issue and verify time-based one-time passwords")]
struct Cli {
    /// Configuration file (defaults to ~/.config/otpauth/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new random shared secret
    CreateSecret,
    /// Print the one-time code for a secret
    Code {
        /// Base32-encoded shared secret
        #[arg(long)]
        secret: String,
        /// Unix timestamp in milliseconds (defaults to now)
        #[arg(long)]
        timestamp: Option<u64>,
    },
    /// Validate a submitted one-time code
    Validate {
        /// Base32-encoded shared secret
        #[arg(long)]
        secret: String,
        /// Submitted code, e.g. 123456 or "123 456"
        #[arg(long)]
        code: String,
        /// Unix timestamp in milliseconds (defaults to now)
        #[arg(long)]
        timestamp: Option<u64>,
    },
}

fn main() {
    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(2);
    }

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::CreateSecret => cli::create_secret::run_create_secret().map(|()| 0),
        Commands::Code { secret, timestamp } => cli::code::run_code(secret, timestamp).map(|()| 0),
        Commands::Validate {
            secret,
            code,
            timestamp,
        } => cli::validate::run_validate(cli.config.as_deref(), &secret, &code, timestamp).map(
            |outcome| match outcome {
                ValidationOutcome::Success => 0,
                ValidationOutcome::Failed | ValidationOutcome::Duplicate => 1,
            },
        ),
    };

    match result {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            let exit_code = match e {
                // Configuration errors (exit code 2)
                OtpAuthError::Config(_) | OtpAuthError::Toml(_) | OtpAuthError::TomlSerialize(_) => 2,
                // OTP errors (exit code 2 - bad input or unusable environment)
                OtpAuthError::Otp(_) => 2,
                // IO errors (exit code 1 - runtime)
                OtpAuthError::Io(_) => 1,
            };

            eprintln!("{}", e);
            std::process::exit(exit_code);
        }
    }
}
