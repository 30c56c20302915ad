//! Constraint integration tests
//!
//! Drives both constraint kinds with candidate streams shaped like real
//! backend output: chunk boundaries in awkward places, overshoot past the
//! valid value, and wrong-typed continuations.

#[cfg(test)]
mod tests {
    use funcall_rs::{Constraint, EnumeratedValueConstraint, JsonSchemaConstraint};
    use serde_json::json;

    use crate::common::CatalogFactory;

    /// Every intermediate candidate of a growing valid value stays viable
    #[test]
    fn test_enumerated_constraint_tracks_a_growing_candidate() {
        let constraint = EnumeratedValueConstraint::new(["get_weather", "get_forecast"]);

        let target = "get_forecast";
        for end in 1..target.len() {
            let outcome = constraint.check(&target[..end]);
            assert!(outcome.is_prefix_valid, "viable at {end}");
            assert!(!outcome.is_complete, "incomplete at {end}");
        }
        assert!(constraint.check(target).is_complete);
    }

    /// Overshoot past a short value stays viable; resolve maps it back
    #[test]
    fn test_enumerated_overshoot_then_resolution() {
        let constraint = EnumeratedValueConstraint::new(["search", "search_web"]);

        assert!(constraint.check("search resu").is_prefix_valid);
        assert_eq!(constraint.resolve("sear"), Some("search"));
    }

    /// A schema constraint built from a catalog entry judges real argument text
    #[test]
    fn test_schema_constraint_over_catalog_parameters() {
        let catalog = CatalogFactory::travel();
        let constraint = JsonSchemaConstraint::new(&catalog[0].parameters).unwrap();

        let complete = constraint.check(
            r#"{"destination":"Lisbon","travelers":2,"class":"business","stops":["Madrid"]}"#,
        );
        assert!(complete.is_complete);

        assert!(
            constraint
                .check(r#"{"destination":"Lisbon","travelers":"#)
                .is_prefix_valid
        );
        // class must come from the enum
        assert!(
            !constraint
                .check(r#"{"destination":"Lisbon","travelers":2,"class":"premium"#)
                .is_prefix_valid
        );
        // travelers is an integer, not a string
        assert!(
            !constraint
                .check(r#"{"destination":"Lisbon","travelers":"two"#)
                .is_prefix_valid
        );
    }

    /// Completion offset survives arbitrary trailing noise
    #[test]
    fn test_completion_offset_is_stable_under_trailing_noise() {
        let constraint = JsonSchemaConstraint::new(&json!({
            "type": "object",
            "properties": {"x": {"type": "integer"}},
            "required": ["x"]
        }))
        .unwrap();

        let bare = constraint.check(r#"{"x":1}"#);
        assert_eq!(bare.complete_end_offset, Some(7));

        for noise in [" garbage", "\n\nDone.", r#" {"x":2}"#] {
            let noisy = constraint.check(&format!(r#"{{"x":1}}{noise}"#));
            assert!(noisy.is_complete);
            assert_eq!(noisy.complete_end_offset, Some(7));
        }
    }

    /// Checking is stateless: interleaved candidates do not disturb each other
    #[test]
    fn test_constraints_are_reentrant_across_candidates() {
        let constraint = JsonSchemaConstraint::new(&json!({"type": "array", "items": {"type": "integer"}})).unwrap();

        let a = constraint.check("[1,2");
        let b = constraint.check("[9]");
        let a_again = constraint.check("[1,2");

        assert_eq!(a, a_again);
        assert!(b.is_complete);
    }

    /// Malformed schema documents fail at construction, never at check time
    #[test]
    fn test_malformed_schemas_fail_at_construction() {
        for schema in [
            json!({"type": "tuple"}),
            json!({"type": 3}),
            json!("just a string"),
            json!({"type": "array", "items": {"type": "whatever"}}),
        ] {
            assert!(
                JsonSchemaConstraint::new(&schema).is_err(),
                "{schema} should be rejected"
            );
        }
    }
}
