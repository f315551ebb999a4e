//! Authentication module
//!
//! Secret generation, HOTP/TOTP code calculation and code validation with
//! replay protection.

pub mod base32;
pub mod hmac;
pub mod hotp;
pub mod replay;
pub mod secret;
pub mod totp;
pub mod validator;
