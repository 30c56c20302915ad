//! Generator scenario tests
//!
//! End-to-end runs through selection and argument generation over scripted
//! backends, pinning the behaviors a caller depends on.

#[cfg(test)]
mod tests {
    use funcall_rs::{EngineError, FunctionSpec, GenerateOptions, Generator, ScriptedBackend};
    use serde_json::json;

    use crate::assert_engine_err;
    use crate::common::{CatalogFactory, ScriptFactory};

    /// Single-function catalog: selection is free, arguments are generated
    #[tokio::test]
    async fn test_weather_request_end_to_end() {
        let generator = Generator::new(CatalogFactory::weather(), ScriptFactory::weather_arguments());

        let call = generator
            .generate("What's the weather in Paris?", GenerateOptions::new())
            .await
            .unwrap();

        assert_eq!(call.name, "get_weather");
        assert_eq!(call.parameters, r#"{"city":"Paris"}"#);
        assert_eq!(call.parsed_parameters().unwrap(), json!({"city": "Paris"}));
    }

    /// Selection among overlapping names, then arguments for the winner
    #[tokio::test]
    async fn test_two_phase_run_with_overlapping_names() {
        let backend = ScriptedBackend::new(["search", r#"{"query":"rust testing"}"#]);
        let generator = Generator::new(CatalogFactory::search_pair(), backend);

        let call = generator
            .generate("find articles about rust testing", GenerateOptions::new())
            .await
            .unwrap();

        assert_eq!(call.name, "search");
        assert_eq!(call.parameters, r#"{"query":"rust testing"}"#);
        // one selection call, one argument call
        assert_eq!(generator.backend().calls(), 2);
    }

    /// The shared-prefix tie is broken by catalog order, pinned in both orders
    #[tokio::test]
    async fn test_shared_prefix_tie_break_is_catalog_order() {
        let backend = ScriptedBackend::new(["search"]);
        let generator = Generator::new(CatalogFactory::search_pair(), backend);
        assert_eq!(generator.choose_function("find").await.unwrap(), "search");

        let mut reversed = CatalogFactory::search_pair();
        reversed.reverse();
        let backend = ScriptedBackend::new(["search"]);
        let generator = Generator::new(reversed, backend);
        assert_eq!(generator.choose_function("find").await.unwrap(), "search_web");
    }

    /// A selection fragment that stopped at a shared prefix still resolves
    #[tokio::test]
    async fn test_selection_fragment_resolves_to_canonical_name() {
        // the script dries up at "sear", a prefix of both names
        let backend = ScriptedBackend::new(["sear"]);
        let generator = Generator::new(CatalogFactory::search_pair(), backend);

        let name = generator.choose_function("find").await.unwrap();
        assert_eq!(name, "search");
    }

    /// An explicit function_call skips selection even with several candidates
    #[tokio::test]
    async fn test_explicit_function_call_wins_over_selection() {
        let backend = ScriptedBackend::new([r#"{"query":"q","site":"docs.rs"}"#]);
        let generator = Generator::new(CatalogFactory::search_pair(), backend);

        let call = generator
            .generate(
                "find something",
                GenerateOptions::new().with_function_call("search_web"),
            )
            .await
            .unwrap();

        assert_eq!(call.name, "search_web");
        assert_eq!(generator.backend().calls(), 1);
    }

    /// Unknown explicit names surface the catalog lookup error
    #[tokio::test]
    async fn test_unknown_explicit_function_is_an_error() {
        let generator = Generator::new(CatalogFactory::weather(), ScriptedBackend::silent());

        let result = generator
            .generate(
                "anything",
                GenerateOptions::new().with_function_call("get_stock_price"),
            )
            .await;

        assert_engine_err!(result, EngineError::UnknownFunction { .. });
    }

    /// Nested arguments with arrays and enums generate and trim correctly
    #[tokio::test]
    async fn test_travel_arguments_with_nested_schema() {
        let backend = ScriptedBackend::new([
            r#"{"destination":"Lisbon","#,
            r#""travelers":2,"#,
            r#""class":"business","stops":["Madrid"]}"#,
        ]);
        let generator = Generator::new(CatalogFactory::travel(), backend);

        let call = generator
            .generate("Book me a trip to Lisbon", GenerateOptions::new())
            .await
            .unwrap();

        let value = call.parsed_parameters().unwrap();
        assert_eq!(value["destination"], "Lisbon");
        assert_eq!(value["travelers"], 2);
        assert_eq!(value["class"], "business");
        assert_eq!(value["stops"], json!(["Madrid"]));
    }

    /// Options budgets flow through to the argument phase
    #[tokio::test]
    async fn test_options_budget_limits_argument_generation() {
        let backend = ScriptFactory::char_by_char(r#"{"city":"Paris"}"#);
        let generator = Generator::new(CatalogFactory::weather(), backend);

        let call = generator
            .generate(
                "Weather in Paris?",
                GenerateOptions::new().with_max_new_steps(4),
            )
            .await
            .unwrap();

        assert_eq!(call.parameters, r#"{"ci"#);
        assert!(call.parsed_parameters().is_err());
    }

    /// A backend that drifts off-schema is a rejection, not silent bad output
    #[tokio::test]
    async fn test_off_schema_output_is_rejected_not_returned() {
        let backend = ScriptedBackend::new([r#"Sure! The weather function"#]);
        let generator = Generator::new(CatalogFactory::weather(), backend);

        let result = generator
            .generate("Weather in Paris?", GenerateOptions::new())
            .await;

        assert_engine_err!(result, EngineError::ConstraintRejected { .. });
    }

    /// A custom schema with a top-level enum value works through the facade
    #[tokio::test]
    async fn test_top_level_enum_parameters() {
        let functions = vec![FunctionSpec::new("set_mode", json!({"enum": ["fast", "slow"]}))];
        let backend = ScriptedBackend::new([r#""fast""#]);
        let generator = Generator::new(functions, backend);

        let call = generator
            .generate("go fast", GenerateOptions::new())
            .await
            .unwrap();

        assert_eq!(call.parameters, r#""fast""#);
    }
}
