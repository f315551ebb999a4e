//! Core library for the otpauth tool
//!
//! This crate issues and verifies time-based one-time passwords (RFC 6238)
//! for second-factor authentication, with at-most-once acceptance of each
//! code per time window.

pub mod error;
pub mod types;

pub mod auth;
pub mod config;

pub use auth::replay::{EvictionPolicy, ReplayGuard};
pub use auth::secret::create_secret;
pub use auth::validator::TotpValidator;
pub use types::{OtpSecret, TotpCode, ValidationOutcome};

/// Initialize logging infrastructure
///
/// Sets up tracing with systemd journal logging when running under systemd.
/// Otherwise logs to stderr with pretty formatting.
pub fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    #[cfg(target_os = "linux")]
    {
        if std::env::var("JOURNAL_STREAM").is_ok() {
            let journal_layer = tracing_journald::layer()?;
            tracing_subscriber::registry()
                .with(journal_layer)
                .with(tracing_subscriber::filter::LevelFilter::INFO)
                .init();
            return Ok(());
        }
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    Ok(())
}
