//! Common test utilities for funcall-rs
//!
//! This module provides shared test infrastructure for all tests:
//! - Function catalog fixtures with known schemas
//! - Scripted backend factories
//! - Custom assertions and helpers

pub mod fixtures;

// Re-export commonly used items
pub use fixtures::{CatalogFactory, ScriptFactory};

/// Skip test if environment variable is not set
#[macro_export]
macro_rules! skip_without_env {
    ($var:expr) => {
        if std::env::var($var).is_err() {
            eprintln!("Skipping test: {} environment variable not set", $var);
            return;
        }
    };
}

/// Assert that a result is an error of the expected engine variant
#[macro_export]
macro_rules! assert_engine_err {
    ($result:expr, $pattern:pat) => {
        match $result {
            Err($pattern) => {}
            Err(other) => panic!("unexpected error variant: {other:?}"),
            Ok(value) => panic!("expected an error, got: {value:?}"),
        }
    };
}
