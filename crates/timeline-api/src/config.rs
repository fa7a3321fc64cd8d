//! Module: config
//! Responsibility: typed startup configuration (spec §6 "Configuration
//! options") — `pageSize`/`countRange` bounds, the network id used for
//! address derivation, and connection-pool endpoint/timeout settings.
//! Does not own: reading the document store's own pool configuration beyond
//! the endpoint string and timeout it's handed.
//! Boundary: environment variables in, a validated [`Config`] out, assembled
//! once at process start rather than threaded through as `Option`s.

use std::time::Duration;
use thiserror::Error as ThisError;

/// Bounds for `limit` sanitization (spec §6 "`countRange = { min, max,
/// preset }`"). `preset` is the value substituted into the canonicalizing
/// redirect (spec §4.4 step 2, §8 "Limit canonicalization").
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CountRange {
    pub min: usize,
    pub max: usize,
    pub preset: usize,
}

impl CountRange {
    #[must_use]
    pub const fn contains(&self, count: usize) -> bool {
        count >= self.min && count <= self.max
    }
}

impl Default for CountRange {
    fn default() -> Self {
        Self { min: 1, max: 100, preset: 25 }
    }
}

/// Fully assembled, validated startup configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub count_range: CountRange,
    /// Byte used by public-key→address derivation (spec §6).
    pub network_id: u8,
    pub pool_endpoint: String,
    pub request_timeout: Duration,
}

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("environment variable {name} is not valid: {reason}")]
    InvalidValue { name: &'static str, reason: String },
    #[error("countRange is invalid: min={min}, max={max}, preset={preset} (require min <= preset <= max)")]
    InvalidCountRange { min: usize, max: usize, preset: usize },
}

impl Config {
    /// Load from environment variables, falling back to the teacher-style
    /// envy defaults below when unset, then validate eagerly (spec §6): a
    /// misconfigured `countRange` fails at process start, not on the first
    /// request.
    pub fn from_env() -> Result<Self, ConfigError> {
        let min = env_usize("TIMELINE_PAGE_SIZE_MIN", 1)?;
        let max = env_usize("TIMELINE_PAGE_SIZE_MAX", 100)?;
        let preset = env_usize("TIMELINE_PAGE_SIZE_DEFAULT", 25)?;
        let count_range = CountRange { min, max, preset };

        if !(count_range.min <= count_range.preset && count_range.preset <= count_range.max) {
            return Err(ConfigError::InvalidCountRange { min, max, preset });
        }

        let network_id = env_u8("TIMELINE_NETWORK_ID", 0x68)?;
        let pool_endpoint =
            std::env::var("TIMELINE_POOL_ENDPOINT").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let request_timeout_secs = env_u64("TIMELINE_REQUEST_TIMEOUT_SECS", 10)?;

        Ok(Self {
            count_range,
            network_id,
            pool_endpoint,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }
}

fn env_usize(name: &'static str, default: usize) -> Result<usize, ConfigError> {
    match std::env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => raw
            .parse()
            .map_err(|err: std::num::ParseIntError| ConfigError::InvalidValue { name, reason: err.to_string() }),
    }
}

fn env_u8(name: &'static str, default: u8) -> Result<u8, ConfigError> {
    match std::env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => raw
            .parse()
            .map_err(|err: std::num::ParseIntError| ConfigError::InvalidValue { name, reason: err.to_string() }),
    }
}

fn env_u64(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => raw
            .parse()
            .map_err(|err: std::num::ParseIntError| ConfigError::InvalidValue { name, reason: err.to_string() }),
    }
}
