// system-tests/src/lib.rs
// ============================================================================
// Module: Pet Store System Tests Library
// Description: Shared configuration, bootstrap, and artifacts for live suite binaries.
// Purpose: Resolve the service under test once per pet, user, and store binary.
// Dependencies: petstore-client, serde_jcs, thiserror, tracing
// ============================================================================

//! ## Overview
//! This crate hosts the environment configuration, one-time bootstrap, and
//! artifact reporter used by the live pet-store suites in `system-tests/tests`. The suites only build
//! with the `system-tests` feature because they talk to a public service.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod artifacts;
pub mod bootstrap;
pub mod config;
