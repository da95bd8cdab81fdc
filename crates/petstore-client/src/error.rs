// crates/petstore-client/src/error.rs
// ============================================================================
// Module: Pet Store Errors
// Description: Error taxonomy for contract scenarios.
// Purpose: Separate dispatch failures from expectation failures.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Scenario failures fall into a few buckets. Configuration errors stop a
//! group before it starts, request errors mean the exchange never completed,
//! and expectation errors mean the service answered but broke the contract.
//! Only expectation errors can confirm a known discrepancy.

use thiserror::Error;

/// Errors raised while building, dispatching, or checking an exchange.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PetstoreError {
    /// Invalid target or client configuration.
    #[error("config error: {0}")]
    Config(String),
    /// The request could not be built, sent, or read.
    #[error("request failed: {0}")]
    Request(String),
    /// The response did not meet an expectation.
    #[error("expectation failed: {0}")]
    Expectation(String),
    /// A scenario group was declared out of order.
    #[error("scenario ordering error: {0}")]
    Ordering(String),
}

impl PetstoreError {
    /// Returns true when the error is a contract expectation failure.
    #[must_use]
    pub const fn is_expectation(&self) -> bool {
        matches!(self, Self::Expectation(_))
    }

    /// Returns a stable label for reports.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Request(_) => "request",
            Self::Expectation(_) => "expectation",
            Self::Ordering(_) => "ordering",
        }
    }
}
