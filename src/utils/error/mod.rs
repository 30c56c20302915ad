//! Error handling utilities
//!
//! This module provides the crate-wide error type and result alias.

pub mod error;

// Re-export commonly used types
pub use error::*;
