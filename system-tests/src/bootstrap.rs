// system-tests/src/bootstrap.rs
// ============================================================================
// Module: Suite Bootstrap
// Description: One-time resolution of the target service for live suites.
// Purpose: Fix the base address and suite options once per test binary.
// Dependencies: petstore-client, tracing
// ============================================================================

//! ## Overview
//! [`bootstrap`] reads [`SystemTestConfig`] and resolves it into a
//! [`SuiteTarget`] exactly once per process. Every later call returns the
//! same value, including the same error when configuration was invalid, so
//! each group reports a bootstrap failure instead of running half-configured.
//!
//! Only local validation happens here. An unreachable host is not a
//! bootstrap failure; it surfaces in the first scenario that dispatches.

use std::path::Path;
use std::path::PathBuf;
use std::sync::OnceLock;

use petstore_client::ApiClient;
use petstore_client::ApiTarget;
use petstore_client::PetstoreError;
use petstore_client::PollPolicy;
use petstore_client::target::DEFAULT_BASE_URL;
use petstore_client::target::DEFAULT_REQUEST_TIMEOUT;

use crate::config::SystemTestConfig;

// ============================================================================
// SECTION: Suite Target
// ============================================================================

/// Read-only settings shared by every group in a test binary.
#[derive(Debug, Clone)]
pub struct SuiteTarget {
    /// Service under test.
    target: ApiTarget,
    /// Whether reproduced known discrepancies fail their group.
    strict_discrepancies: bool,
    /// Poll deadline multiplier.
    poll_scale: u32,
    /// Artifact run root override.
    run_root: Option<PathBuf>,
}

impl SuiteTarget {
    /// Resolves configuration into a suite target, applying defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PetstoreError::Config`] when the base address is invalid.
    pub fn from_config(config: SystemTestConfig) -> Result<Self, PetstoreError> {
        let base_url = config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let timeout = config.timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        Ok(Self {
            target: ApiTarget::new(base_url, timeout)?,
            strict_discrepancies: config.strict_discrepancies,
            poll_scale: config.poll_scale.unwrap_or(1),
            run_root: config.run_root,
        })
    }

    /// Returns the service under test.
    #[must_use]
    pub const fn target(&self) -> &ApiTarget {
        &self.target
    }

    /// Returns whether reproduced known discrepancies fail their group.
    #[must_use]
    pub const fn strict_discrepancies(&self) -> bool {
        self.strict_discrepancies
    }

    /// Returns the configured artifact run root, if any.
    #[must_use]
    pub fn run_root(&self) -> Option<&Path> {
        self.run_root.as_deref()
    }

    /// Applies the configured deadline multiplier to a call-site policy.
    #[must_use]
    pub fn poll(&self, policy: PollPolicy) -> PollPolicy {
        policy.scaled(self.poll_scale)
    }

    /// Builds a fresh client for one group.
    ///
    /// # Errors
    ///
    /// Returns [`PetstoreError::Config`] when the HTTP client cannot be built.
    pub fn client(&self) -> Result<ApiClient, PetstoreError> {
        self.target.client()
    }
}

// ============================================================================
// SECTION: One-Time Setup
// ============================================================================

/// Resolves the suite target on first call and returns it on every call.
///
/// # Errors
///
/// Returns the configuration error from the first resolution attempt.
pub fn bootstrap() -> Result<&'static SuiteTarget, PetstoreError> {
    static SUITE: OnceLock<Result<SuiteTarget, PetstoreError>> = OnceLock::new();
    SUITE
        .get_or_init(|| {
            let resolved = SystemTestConfig::load()
                .map_err(PetstoreError::Config)
                .and_then(SuiteTarget::from_config);
            match &resolved {
                Ok(suite) => tracing::info!(
                    base_url = %suite.target.base_url(),
                    timeout_secs = suite.target.timeout().as_secs(),
                    strict = suite.strict_discrepancies,
                    poll_scale = suite.poll_scale,
                    "suite target resolved"
                ),
                Err(err) => tracing::error!(error = %err, "suite bootstrap failed"),
            }
            resolved
        })
        .as_ref()
        .map_err(Clone::clone)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
