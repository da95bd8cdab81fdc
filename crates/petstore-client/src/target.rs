// crates/petstore-client/src/target.rs
// ============================================================================
// Module: API Target
// Description: Validated description of the service under test.
// Purpose: Hold the base address and request timeout shared by all scenarios.
// Dependencies: url, reqwest
// ============================================================================

//! ## Overview
//! An [`ApiTarget`] is built once per test binary and read by every scenario.
//! Only `http` and `https` base addresses without embedded credentials are
//! accepted; anything else is a configuration error raised before the first
//! request.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::client::ApiClient;
use crate::error::PetstoreError;

/// Public pet-store deployment exercised by default.
pub const DEFAULT_BASE_URL: &str = "https://petstore.swagger.io/v2";
/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// User agent sent with every request.
const USER_AGENT: &str = concat!("petstore-contract-suite/", env!("CARGO_PKG_VERSION"));

/// Validated target address and request limits.
///
/// # Invariants
/// - `base_url` uses `http` or `https` and carries no credentials.
/// - `timeout` is non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiTarget {
    /// Base address every path template is appended to.
    base_url: Url,
    /// Per-request timeout covering connect, send, and body read.
    timeout: Duration,
}

impl ApiTarget {
    /// Parses and validates a target address.
    ///
    /// # Errors
    ///
    /// Returns [`PetstoreError::Config`] when the address is malformed, uses
    /// another scheme, embeds credentials, or the timeout is zero.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PetstoreError> {
        let url = Url::parse(base_url.trim())
            .map_err(|err| PetstoreError::Config(format!("invalid base url {base_url}: {err}")))?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(PetstoreError::Config(format!(
                    "base url scheme must be http or https, got {other}"
                )));
            }
        }
        if url.cannot_be_a_base() || url.host_str().is_none() {
            return Err(PetstoreError::Config(format!("base url {base_url} has no host")));
        }
        if !url.username().is_empty() || url.password().is_some() {
            return Err(PetstoreError::Config("base url must not embed credentials".to_string()));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(PetstoreError::Config(
                "base url must not carry a query or fragment".to_string(),
            ));
        }
        if timeout.is_zero() {
            return Err(PetstoreError::Config("request timeout must be non-zero".to_string()));
        }
        Ok(Self {
            base_url: url,
            timeout,
        })
    }

    /// Returns the public pet-store deployment with the default timeout.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the constant address is validated like any other.
    pub fn public() -> Result<Self, PetstoreError> {
        Self::new(DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Returns the base address.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds a fresh client with an empty transcript.
    ///
    /// # Errors
    ///
    /// Returns [`PetstoreError::Config`] when the HTTP client cannot be built.
    pub fn client(&self) -> Result<ApiClient, PetstoreError> {
        let http = Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| PetstoreError::Config(format!("failed to build http client: {err}")))?;
        Ok(ApiClient::with_http_client(self.base_url.clone(), http))
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
