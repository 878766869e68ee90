//! # Request Field Rules
//!
//! Per-operation declaration of which container fields are mandatory and
//! which are optional. The same entity type is required/optional differently
//! for create vs. update vs. cancel, so rules are rebuilt immediately before
//! each request and validated once, purely in memory, before any network
//! call.

use crate::container::Container;
use crate::error::{GatewayError, GatewayResult};

/// Required/optional field sets for one request type.
///
/// Validation reports every missing required field in declaration order, not
/// just the first one found, so a failed request is debuggable in one pass.
#[derive(Debug, Clone, Default)]
pub struct RequestRules {
    required: Vec<&'static str>,
    optional: Vec<&'static str>,
}

impl RequestRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the required set
    pub fn require(mut self, names: &[&'static str]) -> Self {
        self.required = names.to_vec();
        self
    }

    /// Replace the optional set.
    /// Optional fields are never checked; the set documents the operation's
    /// accepted surface.
    pub fn optional(mut self, names: &[&'static str]) -> Self {
        self.optional = names.to_vec();
        self
    }

    /// Field names currently declared required
    pub fn required_fields(&self) -> &[&'static str] {
        &self.required
    }

    /// Field names currently declared optional
    pub fn optional_fields(&self) -> &[&'static str] {
        &self.optional
    }

    /// Check every required field against the container.
    ///
    /// Fails with a validation error naming all missing fields. A required
    /// name that is not even declared in the container's schema surfaces as a
    /// schema error instead, since that is a bug in the rules, not the
    /// request.
    pub fn validate(&self, container: &Container) -> GatewayResult<()> {
        let mut missing = Vec::new();
        for name in &self.required {
            if container.get(name)?.is_none() {
                missing.push((*name).to_string());
            }
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(GatewayError::Validation { missing })
        }
    }
}
