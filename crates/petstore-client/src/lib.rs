// crates/petstore-client/src/lib.rs
// ============================================================================
// Module: Pet Store Client
// Description: Request builder, response expectations, and scenario runner.
// Purpose: Provide the building blocks for black-box pet-store contract suites.
// Dependencies: reqwest, serde_json, thiserror, tokio, tracing, url
// ============================================================================

//! ## Overview
//! This crate hosts the pieces every pet-store contract scenario is built
//! from: an [`ApiTarget`] naming the service under test, an [`ApiClient`] with
//! a composable [`RequestSpec`] builder, [`ApiResponse`] expectations, the
//! [`eventually`] poll helper for eventually-consistent reads, typed payload
//! models, and an ordered [`ScenarioGroup`] runner that labels known contract
//! discrepancies instead of hiding them.
//!
//! Nothing here talks to the live service on its own; the `system-tests`
//! crate wires these pieces to the public endpoint.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client;
pub mod error;
pub mod model;
pub mod path;
pub mod poll;
pub mod response;
pub mod scenario;
pub mod target;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use client::ApiClient;
pub use client::RequestBody;
pub use client::RequestSpec;
pub use client::TranscriptEntry;
pub use error::PetstoreError;
pub use model::ApiMessage;
pub use model::Category;
pub use model::Order;
pub use model::OrderStatus;
pub use model::Pet;
pub use model::PetStatus;
pub use model::Tag;
pub use model::User;
pub use path::PathTemplate;
pub use poll::PollPolicy;
pub use poll::eventually;
pub use response::ApiResponse;
pub use scenario::GroupFailure;
pub use scenario::GroupReport;
pub use scenario::Scenario;
pub use scenario::ScenarioGroup;
pub use scenario::ScenarioKind;
pub use scenario::ScenarioOutcome;
pub use scenario::ScenarioRecord;
pub use target::ApiTarget;
