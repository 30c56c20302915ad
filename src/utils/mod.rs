//! Utility modules for the engine
//!
//! ## Module Organization
//!
//! - **error**: Error handling and the crate-wide result alias

pub mod error;

// Re-export commonly used types for convenience
pub use error::{EngineError, Result};

/// Truncate string to specified length with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut = s
            .char_indices()
            .nth(max_len.saturating_sub(3))
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        format!("{}...", &s[..cut])
    }
}
