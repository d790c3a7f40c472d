//! Domain types and validators for Provis configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "fetch.retries",
    "fetch.retry_delay_secs",
    "fetch.attempt_timeout_secs",
    "install.timeout_secs",
    "python.pip_program",
];

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.provis/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProvisConfig {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub install: InstallConfig,
    #[serde(default)]
    pub python: PythonConfig,
}

/// Artifact download behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Attempt budget per fetch step.
    #[serde(default = "default_fetch_retries")]
    pub retries: u32,
    /// Fixed wait between attempts.
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
    /// Per-attempt timeout for the transfer command.
    #[serde(default = "default_attempt_timeout_secs")]
    pub attempt_timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            retries: default_fetch_retries(),
            retry_delay_secs: default_retry_delay_secs(),
            attempt_timeout_secs: default_attempt_timeout_secs(),
        }
    }
}

/// Package-manager invocation behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallConfig {
    /// Timeout for index refresh and package installation commands.
    #[serde(default = "default_install_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_install_timeout_secs(),
        }
    }
}

/// Interpreted-language module installer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PythonConfig {
    /// Program used to install Python modules, e.g. `pip` or `pip3`.
    #[serde(default = "default_pip_program")]
    pub pip_program: String,
}

impl Default for PythonConfig {
    fn default() -> Self {
        Self {
            pip_program: default_pip_program(),
        }
    }
}

fn default_fetch_retries() -> u32 {
    5
}

fn default_retry_delay_secs() -> u64 {
    2
}

fn default_attempt_timeout_secs() -> u64 {
    60
}

fn default_install_timeout_secs() -> u64 {
    600
}

fn default_pip_program() -> String {
    "pip".to_string()
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Applies a validated key/value pair to the config.
///
/// # Errors
///
/// Returns an error if the key is unknown or the value does not parse for it.
pub fn apply_config_value(config: &mut ProvisConfig, key: &str, value: &str) -> Result<()> {
    validate_config_key(key)?;
    let invalid = |expected: &str| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    };
    match key {
        "fetch.retries" => {
            config.fetch.retries = parse_positive(value).ok_or_else(|| invalid("a positive integer"))?;
        }
        "fetch.retry_delay_secs" => {
            config.fetch.retry_delay_secs =
                value.parse().map_err(|_| invalid("a non-negative integer"))?;
        }
        "fetch.attempt_timeout_secs" => {
            config.fetch.attempt_timeout_secs =
                parse_positive(value).ok_or_else(|| invalid("a positive integer"))?;
        }
        "install.timeout_secs" => {
            config.install.timeout_secs =
                parse_positive(value).ok_or_else(|| invalid("a positive integer"))?;
        }
        "python.pip_program" => {
            if value.trim().is_empty() {
                return Err(invalid("a program name").into());
            }
            config.python.pip_program = value.to_string();
        }
        _ => unreachable!("key validated above"),
    }
    Ok(())
}

fn parse_positive<T: std::str::FromStr + PartialOrd + From<u8>>(value: &str) -> Option<T> {
    value.parse::<T>().ok().filter(|v| *v > T::from(0))
}

// ── Unit tests ───────────────────────────────────────────────────────────────
