//! Membership in a fixed set of strings

use tracing::warn;

use crate::core::constraint::Constraint;
use crate::core::types::Validation;

/// Accepts exactly the members of an allowed set
///
/// The prefix test is bidirectional: a candidate is still viable when it is
/// a prefix of an allowed value, and also when an allowed value is a prefix
/// of the candidate. The second direction matters because a backend that
/// emits several characters per step can overshoot a short value before the
/// overshoot is observed.
///
/// Declaration order is preserved; [`resolve`](Self::resolve) uses it to
/// map a generated fragment back to a canonical value deterministically.
#[derive(Debug, Clone)]
pub struct EnumeratedValueConstraint {
    allowed: Vec<String>,
}

impl EnumeratedValueConstraint {
    /// Build a constraint over an allowed set, in declaration order
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();
        if allowed.is_empty() {
            warn!("enumerated constraint built over an empty set rejects everything");
        }
        Self { allowed }
    }

    /// The allowed values, in declaration order
    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }

    /// Canonicalize a generated fragment
    ///
    /// Returns the first allowed value, in declaration order, that has the
    /// candidate as a prefix. Generation can legitimately stop at a prefix
    /// shared by several values; the first declared one wins. A candidate
    /// that instead overshot a value resolves to the longest allowed value
    /// it starts with, so `"search results"` maps to `"search"` even when
    /// `"search_web"` is also declared.
    pub fn resolve(&self, candidate: &str) -> Option<&str> {
        self.allowed
            .iter()
            .find(|value| value.starts_with(candidate))
            .or_else(|| {
                self.allowed
                    .iter()
                    .filter(|value| candidate.starts_with(value.as_str()))
                    .max_by_key(|value| value.len())
            })
            .map(String::as_str)
    }
}

impl Constraint for EnumeratedValueConstraint {
    fn check(&self, candidate: &str) -> Validation {
        if self.allowed.iter().any(|value| value == candidate) {
            return Validation::complete_whole();
        }
        let viable = self
            .allowed
            .iter()
            .any(|value| value.starts_with(candidate) || candidate.starts_with(value.as_str()));
        if viable {
            Validation::incomplete()
        } else {
            Validation::rejected()
        }
    }
}
