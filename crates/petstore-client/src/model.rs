// crates/petstore-client/src/model.rs
// ============================================================================
// Module: Payload Models
// Description: Typed pet, user, and order payloads.
// Purpose: Build valid request bodies with the service's field names.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! These types mirror the documented wire shapes (camelCase field names).
//! They only describe valid payloads; scenarios that exercise invalid input
//! (unknown status strings, malformed JSON) build those bodies by hand.
//! Optional fields are omitted when unset so a payload carries exactly the
//! fields a scenario names.

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Pets
// ============================================================================

/// Pet availability status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetStatus {
    /// Available for sale.
    Available,
    /// Sale in progress.
    Pending,
    /// Sold.
    Sold,
}

impl PetStatus {
    /// Returns the wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Pending => "pending",
            Self::Sold => "sold",
        }
    }
}

/// Pet category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category identifier.
    pub id: i64,
    /// Category name.
    pub name: String,
}

/// Pet tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag identifier.
    pub id: i64,
    /// Tag name.
    pub name: String,
}

/// Pet record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    /// Pet identifier.
    pub id: i64,
    /// Pet name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Availability status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PetStatus>,
    /// Optional category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Photo URLs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photo_urls: Vec<String>,
    /// Tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl Pet {
    /// Creates a pet with an id, name, and status only.
    #[must_use]
    pub fn new(id: i64, name: &str, status: PetStatus) -> Self {
        Self {
            id,
            name: Some(name.to_string()),
            status: Some(status),
            category: None,
            photo_urls: Vec::new(),
            tags: Vec::new(),
        }
    }
}

// ============================================================================
// SECTION: Users
// ============================================================================

/// User record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User identifier.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Phone number.
    pub phone: String,
    /// Numeric status code.
    pub user_status: i32,
}

// ============================================================================
// SECTION: Orders
// ============================================================================

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed.
    Placed,
    /// Order approved.
    Approved,
    /// Order delivered.
    Delivered,
}

impl OrderStatus {
    /// Returns the wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Placed => "placed",
            Self::Approved => "approved",
            Self::Delivered => "delivered",
        }
    }
}

/// Store order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order identifier.
    pub id: i64,
    /// Ordered pet identifier.
    pub pet_id: i64,
    /// Quantity ordered.
    pub quantity: i32,
    /// Ship date in RFC 3339 form, sent as given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_date: Option<String>,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Completion flag.
    pub complete: bool,
}

// ============================================================================
// SECTION: Service Messages
// ============================================================================

/// Generic `{code, type, message}` body returned for errors and acknowledgements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    /// Numeric code.
    #[serde(default)]
    pub code: i64,
    /// Message kind, e.g. `unknown` or `error`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
}

// ============================================================================
// SECTION: Tests
// ============================================================================
