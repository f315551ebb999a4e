//! CLI command implementations
//!
//! This module contains the implementation of all CLI subcommands.

pub mod code;
pub mod create_secret;
pub mod validate;
