//! Core type definition module
//!
//! Contains all core data structures and type definitions

pub mod functions;
pub mod generation;

// Re-export all public types
pub use functions::*;
pub use generation::*;
