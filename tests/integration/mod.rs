//! Integration tests
//!
//! Tests that verify component interactions without a live backend.

pub mod constraint_tests;
pub mod generator_tests;
