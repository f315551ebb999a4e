//! Configuration module
//!
//! Tunables for validation: the time step and the replay guard's size and
//! eviction policy. Loaded from a TOML file; every field has a default.

use crate::auth::replay::{EvictionPolicy, DEFAULT_MAX_CACHE_SIZE};
use crate::auth::totp::TIME_STEP_MS;
use serde::{Deserialize, Serialize};

pub mod toml_config;

/// Validation service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpAuthConfig {
    /// Length of one time window in milliseconds
    #[serde(default = "default_time_step_ms")]
    pub time_step_ms: u64,

    /// Number of secrets the replay guard tracks before evicting
    #[serde(default = "default_replay_cache_capacity")]
    pub replay_cache_capacity: usize,

    /// How the replay guard makes room when full
    #[serde(default)]
    pub eviction: EvictionPolicy,

    /// Reject secrets that do not decode to exactly 20 bytes
    #[serde(default)]
    pub strict_secret_length: bool,
}

fn default_time_step_ms() -> u64 {
    TIME_STEP_MS
}
fn default_replay_cache_capacity() -> usize {
    DEFAULT_MAX_CACHE_SIZE
}

impl OtpAuthConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.time_step_ms == 0 {
            return Err("Time step cannot be zero".to_string());
        }

        if self.replay_cache_capacity == 0 {
            return Err("Replay cache capacity cannot be zero".to_string());
        }

        Ok(())
    }
}

impl Default for OtpAuthConfig {
    fn default() -> Self {
        Self {
            time_step_ms: default_time_step_ms(),
            replay_cache_capacity: default_replay_cache_capacity(),
            eviction: EvictionPolicy::default(),
            strict_secret_length: false,
        }
    }
}
