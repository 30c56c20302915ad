//! Constraints over partial candidates
//!
//! A constraint is a stateless oracle: given the text generated so far it
//! answers whether that text can still become a valid instance, already is
//! one, and where the valid instance ends. Implementations never see the
//! prompt, only the candidate.

pub mod enumerated;
pub mod json_schema;

// Re-export main components
pub use enumerated::EnumeratedValueConstraint;
pub use json_schema::JsonSchemaConstraint;

use crate::core::types::Validation;

/// Streaming acceptance oracle over a target grammar
///
/// Implementations are stateless and reentrant: `check` receives the whole
/// candidate each call and may be invoked concurrently from multiple tasks.
/// Checking must never fail; a candidate that cannot be part of any valid
/// instance comes back with `is_prefix_valid == false`.
pub trait Constraint: Send + Sync {
    /// Judge a partial candidate
    fn check(&self, candidate: &str) -> Validation;
}

impl<C: Constraint + ?Sized> Constraint for &C {
    fn check(&self, candidate: &str) -> Validation {
        (**self).check(candidate)
    }
}
