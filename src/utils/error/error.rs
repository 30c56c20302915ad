//! Error handling for the engine
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for the engine
pub type Result<T> = std::result::Result<T, EngineError>;

/// Main error type for the engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// A requested or selected function name is not in the catalog
    #[error("Unknown function: {name}")]
    UnknownFunction {
        /// The name that failed the catalog lookup
        name: String,
    },

    /// A candidate stopped matching its constraint mid-generation
    #[error("Constraint rejected candidate after {} chars: {candidate:?}", candidate.chars().count())]
    ConstraintRejected {
        /// The candidate text at the moment of rejection
        candidate: String,
    },

    /// A schema document could not be interpreted at constraint construction
    #[error("Malformed schema: {0}")]
    MalformedSchema(String),

    /// A generation backend failed to produce an extension
    #[error("Backend error: {0}")]
    Backend(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Helper functions for creating specific errors
impl EngineError {
    pub fn unknown_function<S: Into<String>>(name: S) -> Self {
        Self::UnknownFunction { name: name.into() }
    }

    pub fn rejected<S: Into<String>>(candidate: S) -> Self {
        Self::ConstraintRejected {
            candidate: candidate.into(),
        }
    }

    pub fn malformed_schema<S: Into<String>>(message: S) -> Self {
        Self::MalformedSchema(message.into())
    }

    pub fn backend<S: Into<String>>(message: S) -> Self {
        Self::Backend(message.into())
    }
}

impl EngineError {
    /// Stable machine-readable error category
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::UnknownFunction { .. } => "unknown_function",
            Self::ConstraintRejected { .. } => "constraint_rejected",
            Self::MalformedSchema(_) => "malformed_schema",
            Self::Backend(_) => "backend",
            Self::Serialization(_) => "serialization",
            Self::HttpClient(_) => "http_client",
        }
    }

    /// Whether a retry with fresh sampling or a new connection can succeed.
    ///
    /// Rejection is a property of one sampled trajectory, not of the
    /// request; transport failures are likewise transient. Catalog and
    /// schema errors are deterministic and will fail again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConstraintRejected { .. } | Self::Backend(_) | Self::HttpClient(_)
        )
    }
}
