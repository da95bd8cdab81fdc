// crates/petstore-client/src/response.rs
// ============================================================================
// Module: API Response
// Description: Captured response plus contract expectations.
// Purpose: Assert status codes, body fields, and headers with clear failures.
// Dependencies: reqwest, serde, serde_json
// ============================================================================

//! ## Overview
//! An [`ApiResponse`] is a fully read exchange result. Expectations return
//! `Result<&Self, PetstoreError>` so they chain with `?`:
//!
//! ```ignore
//! response.expect_status(200)?.expect_field_eq("name", "Igor")?;
//! ```
//!
//! Field paths are dot separated (`category.name`, `tags.0.name`). When the
//! body is a top-level array, [`ApiResponse::expect_every_item_in`] applies
//! the path to each element.

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::PetstoreError;

/// Longest body excerpt quoted in failure messages.
const BODY_EXCERPT_CHARS: usize = 240;

/// Fully read HTTP response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP method of the originating request.
    method: String,
    /// Request path and query.
    path: String,
    /// Response status code.
    status: u16,
    /// Response headers.
    headers: HeaderMap,
    /// Raw body text.
    body: String,
    /// Body parsed as JSON when possible.
    json: Option<Value>,
}

impl ApiResponse {
    /// Wraps a read response.
    #[must_use]
    pub fn new(method: String, path: String, status: u16, headers: HeaderMap, body: String) -> Self {
        let json = serde_json::from_str(&body).ok();
        Self {
            method,
            path,
            status,
            headers,
            body,
            json,
        }
    }

    /// Returns the status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns the request path and query.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the raw body text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Returns the body as JSON when it parsed.
    #[must_use]
    pub const fn json(&self) -> Option<&Value> {
        self.json.as_ref()
    }

    /// Returns the body as JSON, or as a JSON string when it did not parse.
    #[must_use]
    pub fn body_value(&self) -> Value {
        self.json.clone().unwrap_or_else(|| Value::String(self.body.clone()))
    }

    /// Returns a header value when present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Returns the value at a dot-separated field path.
    #[must_use]
    pub fn field(&self, path: &str) -> Option<&Value> {
        self.json.as_ref().and_then(|root| select(root, path))
    }

    /// Decodes the body into a typed value.
    ///
    /// # Errors
    ///
    /// Returns [`PetstoreError::Expectation`] when the body does not decode.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, PetstoreError> {
        serde_json::from_str(&self.body)
            .map_err(|err| self.failure(&format!("body does not decode: {err}")))
    }

    // ------------------------------------------------------------------------
    // Expectations
    // ------------------------------------------------------------------------

    /// Expects an exact status code.
    ///
    /// # Errors
    ///
    /// Returns [`PetstoreError::Expectation`] on mismatch.
    pub fn expect_status(&self, expected: u16) -> Result<&Self, PetstoreError> {
        if self.status == expected {
            Ok(self)
        } else {
            Err(self.failure(&format!("expected status {expected}, got {}", self.status)))
        }
    }

    /// Expects one of several status codes.
    ///
    /// # Errors
    ///
    /// Returns [`PetstoreError::Expectation`] when the status is not listed.
    pub fn expect_status_in(&self, allowed: &[u16]) -> Result<&Self, PetstoreError> {
        if allowed.contains(&self.status) {
            Ok(self)
        } else {
            Err(self.failure(&format!("expected status in {allowed:?}, got {}", self.status)))
        }
    }

    /// Expects the field at `path` to equal `expected`.
    ///
    /// Numbers compare by value, so `1` and `1.0` are equal.
    ///
    /// # Errors
    ///
    /// Returns [`PetstoreError::Expectation`] when the field is missing or differs.
    pub fn expect_field_eq(
        &self,
        path: &str,
        expected: impl Into<Value>,
    ) -> Result<&Self, PetstoreError> {
        let expected = expected.into();
        let actual = self.require_field(path)?;
        if values_match(actual, &expected) {
            Ok(self)
        } else {
            Err(self.failure(&format!("field {path}: expected {expected}, got {actual}")))
        }
    }

    /// Expects the field at `path` to equal one of `allowed`.
    ///
    /// # Errors
    ///
    /// Returns [`PetstoreError::Expectation`] when the field is missing or not listed.
    pub fn expect_field_one_of(&self, path: &str, allowed: &[Value]) -> Result<&Self, PetstoreError> {
        let actual = self.require_field(path)?;
        if allowed.iter().any(|candidate| values_match(actual, candidate)) {
            Ok(self)
        } else {
            Err(self.failure(&format!(
                "field {path}: expected one of {}, got {actual}",
                Value::Array(allowed.to_vec())
            )))
        }
    }

    /// Expects every element of a top-level array body to carry a field value
    /// from `allowed`. An empty array satisfies the expectation.
    ///
    /// # Errors
    ///
    /// Returns [`PetstoreError::Expectation`] when the body is not an array or
    /// an element's field is missing or not listed.
    pub fn expect_every_item_in(&self, path: &str, allowed: &[Value]) -> Result<&Self, PetstoreError> {
        let Some(Value::Array(items)) = self.json.as_ref() else {
            return Err(self.failure("expected a JSON array body"));
        };
        for (index, item) in items.iter().enumerate() {
            let Some(actual) = select(item, path) else {
                return Err(self.failure(&format!("item {index} has no field {path}")));
            };
            if !allowed.iter().any(|candidate| values_match(actual, candidate)) {
                return Err(self.failure(&format!(
                    "item {index} field {path}: expected one of {}, got {actual}",
                    Value::Array(allowed.to_vec())
                )));
            }
        }
        Ok(self)
    }

    /// Expects the numeric field at `path` to be at least `minimum`.
    ///
    /// # Errors
    ///
    /// Returns [`PetstoreError::Expectation`] when the field is missing,
    /// not numeric, or smaller.
    pub fn expect_field_at_least(&self, path: &str, minimum: f64) -> Result<&Self, PetstoreError> {
        let actual = self.require_field(path)?;
        match actual.as_f64() {
            Some(value) if value >= minimum => Ok(self),
            Some(_) => Err(self.failure(&format!("field {path}: expected >= {minimum}, got {actual}"))),
            None => Err(self.failure(&format!("field {path}: expected a number, got {actual}"))),
        }
    }

    /// Expects a header to be present (any value).
    ///
    /// # Errors
    ///
    /// Returns [`PetstoreError::Expectation`] when the header is absent.
    pub fn expect_header_present(&self, name: &str) -> Result<&Self, PetstoreError> {
        if self.headers.contains_key(name) {
            Ok(self)
        } else {
            Err(self.failure(&format!("expected header {name} to be present")))
        }
    }

    /// Returns the field at `path` or a missing-field failure.
    fn require_field(&self, path: &str) -> Result<&Value, PetstoreError> {
        if self.json.is_none() {
            return Err(self.failure(&format!("field {path}: body is not JSON")));
        }
        self.field(path).ok_or_else(|| self.failure(&format!("field {path} is missing")))
    }

    /// Builds an expectation failure with exchange context.
    fn failure(&self, detail: &str) -> PetstoreError {
        PetstoreError::Expectation(format!(
            "{} {} -> {}: {detail}; body: {}",
            self.method,
            self.path,
            self.status,
            excerpt(&self.body)
        ))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Walks a dot-separated path through objects and arrays.
fn select<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(root);
    }
    path.split('.').try_fold(root, |current, key| match current {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|index| items.get(index)),
        _ => None,
    })
}

/// Compares JSON values, treating numbers by numeric value.
fn values_match(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(left), Value::Number(right)) => {
            if let (Some(l), Some(r)) = (left.as_i64(), right.as_i64()) {
                l == r
            } else if let (Some(l), Some(r)) = (left.as_u64(), right.as_u64()) {
                l == r
            } else {
                left.as_f64().zip(right.as_f64()).is_some_and(|(l, r)| (l - r).abs() < f64::EPSILON)
            }
        }
        _ => actual == expected,
    }
}

/// Truncates a body for failure messages.
fn excerpt(body: &str) -> String {
    if body.chars().count() <= BODY_EXCERPT_CHARS {
        body.to_string()
    } else {
        let head: String = body.chars().take(BODY_EXCERPT_CHARS).collect();
        format!("{head}...")
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
