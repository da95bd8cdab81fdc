// crates/petstore-client/src/path.rs
// ============================================================================
// Module: Path Templates
// Description: Endpoint path templates with named segment placeholders.
// Purpose: Substitute path parameters as percent-encoded segments.
// Dependencies: url
// ============================================================================

//! ## Overview
//! Endpoint paths are written the way the API documents them, for example
//! `/pet/{petId}/uploadImage`. A placeholder always spans a whole segment and
//! its value is pushed as a single encoded segment, so a username of `" "`
//! renders as `%20` and can never introduce extra segments.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use url::Url;

use crate::error::PetstoreError;

/// One parsed segment of a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Literal text copied verbatim.
    Literal(String),
    /// Named placeholder replaced by a parameter value.
    Param(String),
}

/// Parsed endpoint path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    /// Original template text.
    raw: String,
    /// Parsed segments in order.
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Parses a template such as `/store/order/{orderId}`.
    ///
    /// # Errors
    ///
    /// Returns [`PetstoreError::Config`] when the template is not absolute,
    /// has an empty segment, or has a malformed placeholder.
    pub fn parse(raw: &str) -> Result<Self, PetstoreError> {
        let Some(rest) = raw.strip_prefix('/') else {
            return Err(PetstoreError::Config(format!("path template must start with '/': {raw}")));
        };
        let mut segments = Vec::new();
        let mut seen = BTreeSet::new();
        for part in rest.split('/') {
            if part.is_empty() {
                return Err(PetstoreError::Config(format!("empty segment in path template {raw}")));
            }
            if let Some(name) = part.strip_prefix('{').and_then(|inner| inner.strip_suffix('}')) {
                if name.is_empty() || name.contains(['{', '}']) {
                    return Err(PetstoreError::Config(format!(
                        "malformed placeholder {part} in {raw}"
                    )));
                }
                if !seen.insert(name.to_string()) {
                    return Err(PetstoreError::Config(format!(
                        "duplicate placeholder {name} in {raw}"
                    )));
                }
                segments.push(Segment::Param(name.to_string()));
            } else if part.contains(['{', '}']) {
                return Err(PetstoreError::Config(format!("malformed placeholder {part} in {raw}")));
            } else {
                segments.push(Segment::Literal(part.to_string()));
            }
        }
        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// Returns the template text as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the placeholder names in order of appearance.
    #[must_use]
    pub fn params(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Param(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Appends the rendered template to the path of `base`.
    ///
    /// # Errors
    ///
    /// Returns [`PetstoreError::Request`] when a placeholder has no value, a
    /// value was supplied for an unknown placeholder, or `base` cannot carry
    /// path segments.
    pub fn render(
        &self,
        base: &Url,
        values: &BTreeMap<String, String>,
    ) -> Result<Url, PetstoreError> {
        let declared: BTreeSet<&str> = self.params().into_iter().collect();
        if let Some(unknown) = values.keys().find(|key| !declared.contains(key.as_str())) {
            return Err(PetstoreError::Request(format!(
                "path parameter {unknown} is not used by {}",
                self.raw
            )));
        }
        let mut url = base.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                PetstoreError::Request(format!("base url {base} cannot carry a path"))
            })?;
            path.pop_if_empty();
            for segment in &self.segments {
                match segment {
                    Segment::Literal(text) => {
                        path.push(text);
                    }
                    Segment::Param(name) => {
                        let value = values.get(name).ok_or_else(|| {
                            PetstoreError::Request(format!(
                                "missing path parameter {name} for {}",
                                self.raw
                            ))
                        })?;
                        path.push(value);
                    }
                }
            }
        }
        Ok(url)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
