// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed configuration for live pet-store suites.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 fails closed, and so do empty values, zero
//! or non-numeric numbers, and unknown boolean literals. Unset variables fall
//! back to the defaults applied during bootstrap.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for live suite configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Optional target base address override.
    BaseUrl,
    /// Optional per-request timeout override in seconds (positive integer).
    TimeoutSeconds,
    /// Optional artifact run root override.
    RunRoot,
    /// Fail the group on reproduced known discrepancies (`true`/`false` or `1`/`0`).
    StrictDiscrepancies,
    /// Optional multiplier for poll helper deadlines (positive integer).
    PollScale,
}

impl SystemTestEnv {
    /// Every key, in documentation order.
    pub const ALL: [Self; 5] = [
        Self::BaseUrl,
        Self::TimeoutSeconds,
        Self::RunRoot,
        Self::StrictDiscrepancies,
        Self::PollScale,
    ];

    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BaseUrl => "PETSTORE_SYSTEM_TEST_BASE_URL",
            Self::TimeoutSeconds => "PETSTORE_SYSTEM_TEST_TIMEOUT_SEC",
            Self::RunRoot => "PETSTORE_SYSTEM_TEST_RUN_ROOT",
            Self::StrictDiscrepancies => "PETSTORE_SYSTEM_TEST_STRICT_DISCREPANCIES",
            Self::PollScale => "PETSTORE_SYSTEM_TEST_POLL_SCALE",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed system test configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemTestConfig {
    /// Optional target base address override.
    pub base_url: Option<String>,
    /// Optional per-request timeout override.
    pub timeout: Option<Duration>,
    /// Optional artifact run root override.
    pub run_root: Option<PathBuf>,
    /// Whether reproduced known discrepancies fail their group.
    pub strict_discrepancies: bool,
    /// Optional poll deadline multiplier.
    pub poll_scale: Option<u32>,
}

impl SystemTestConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is empty,
    /// or fails validation (for example, an invalid timeout or boolean value).
    pub fn load() -> Result<Self, String> {
        let base_url = read_env_nonempty(SystemTestEnv::BaseUrl.as_str())?
            .map(|value| value.trim().to_string());
        let timeout = read_env_nonempty(SystemTestEnv::TimeoutSeconds.as_str())?
            .map(|value| parse_timeout_seconds(SystemTestEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?;
        let run_root = read_env_nonempty(SystemTestEnv::RunRoot.as_str())?.map(PathBuf::from);
        let strict_discrepancies = parse_bool_env(
            SystemTestEnv::StrictDiscrepancies.as_str(),
            read_env_nonempty(SystemTestEnv::StrictDiscrepancies.as_str())?,
        )?;
        let poll_scale = read_env_nonempty(SystemTestEnv::PollScale.as_str())?
            .map(|value| parse_positive_u32(SystemTestEnv::PollScale.as_str(), &value))
            .transpose()?;
        Ok(Self {
            base_url,
            timeout,
            run_root,
            strict_discrepancies,
            poll_scale,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, String> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| format!("{name} must be valid UTF-8"))
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the variable is set but empty or whitespace.
fn read_env_nonempty(name: &str) -> Result<Option<String>, String> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(format!("{name} must not be empty")),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses a positive integer from an environment variable string.
///
/// # Errors
///
/// Returns an error when the value is non-numeric, out of range, or zero.
fn parse_positive_u32(name: &str, raw: &str) -> Result<u32, String> {
    let value: u32 =
        raw.trim().parse().map_err(|_| format!("{name} must be a positive integer"))?;
    if value == 0 {
        return Err(format!("{name} must be greater than zero"));
    }
    Ok(value)
}

/// Parses a positive timeout value from an environment variable string.
///
/// # Errors
///
/// Returns an error when the value is missing, non-numeric, or zero.
fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, String> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("{name} must be a positive integer number of seconds"))?;
    if secs == 0 {
        return Err(format!("{name} must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}

/// Parses a boolean environment variable, defaulting to false when unset.
///
/// # Errors
///
/// Returns an error when the value is not a recognized boolean literal.
fn parse_bool_env(name: &str, raw: Option<String>) -> Result<bool, String> {
    let Some(value) = raw else {
        return Ok(false);
    };
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
        return Ok(true);
    }
    if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
        return Ok(false);
    }
    Err(format!("{name} must be 1, 0, true, or false"))
}
