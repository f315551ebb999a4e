//! Error types for the otpauth tool
//!
//! Wrong credentials are not errors: a bad secret or an out-of-range code
//! resolves to `ValidationOutcome::Failed`. The types here cover the cases a
//! caller has to handle explicitly, such as an unusable keyed-hash primitive,
//! an exhausted randomness source or a broken configuration file.

use thiserror::Error;

/// Main error type for the otpauth application
#[derive(Error, Debug)]
pub enum OtpAuthError {
    /// Errors related to configuration loading/parsing
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors related to OTP/TOTP operations
    #[error("OTP error: {0}")]
    Otp(#[from] OtpError),

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Configuration-related errors
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Failed to load configuration file: {path}")]
    LoadFailed { path: String },

    #[error("Failed to save configuration file: {path}")]
    SaveFailed { path: String },

    #[error("Configuration validation error: {message}")]
    ValidationError { message: String },

    #[error("I/O error: {message}")]
    IoError { message: String },
}

/// OTP/TOTP operation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("Invalid Base32 secret")]
    InvalidBase32,

    #[error("Invalid secret length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("HMAC key must not be empty")]
    EmptyKey,

    #[error("Secure random source unavailable")]
    RandomSourceUnavailable,

    #[error("System time error")]
    TimeError,

    #[error("Invalid one-time code: {0}")]
    InvalidCode(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, OtpAuthError>;
