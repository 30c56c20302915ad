//! OpenAI-compatible backend tests
//!
//! Mock-server coverage of the `/v1/completions` client, plus one ignored
//! live-API smoke test.

#[cfg(test)]
mod tests {
    use funcall_rs::{
        EngineError, GenerateOptions, GenerationBackend, Generator, OpenAiBackend, OpenAiConfig,
    };
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::common::CatalogFactory;
    use crate::skip_without_env;

    fn backend_for(server: &MockServer) -> OpenAiBackend {
        OpenAiBackend::new(OpenAiConfig {
            api_key: Some("test-key".to_string()),
            api_base: Some(server.uri()),
            model: "test-model".to_string(),
            timeout: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_extend_returns_the_completion_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({"model": "test-model", "prompt": "Args: "})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"text": r#"{"city":"Paris"}"#}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let chunk = backend_for(&server).extend("Args: ", None).await.unwrap();
        assert_eq!(chunk, r#"{"city":"Paris"}"#);
    }

    #[tokio::test]
    async fn test_length_hint_becomes_max_tokens() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/completions"))
            .and(body_partial_json(json!({"max_tokens": 5})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"text": "x"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        // 17 chars at ~4 chars per token rounds up to 5
        backend_for(&server).extend("p", Some(17)).await.unwrap();
    }

    #[tokio::test]
    async fn test_http_error_maps_to_backend_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let err = backend_for(&server).extend("p", None).await.unwrap_err();
        assert!(matches!(err, EngineError::Backend(_)));
        assert!(err.to_string().contains("429"));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_missing_choices_is_a_backend_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let err = backend_for(&server).extend("p", None).await.unwrap_err();
        assert!(matches!(err, EngineError::Backend(_)));
    }

    /// Full generator run over the HTTP surface
    #[tokio::test]
    async fn test_generator_over_mock_completions_server() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"text": r#"{"city":"Paris"} trailing chatter"#}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let generator = Generator::new(CatalogFactory::weather(), backend_for(&server));
        let call = generator
            .generate("What's the weather in Paris?", GenerateOptions::new())
            .await
            .unwrap();

        assert_eq!(call.name, "get_weather");
        assert_eq!(call.parameters, r#"{"city":"Paris"}"#);
    }

    /// Live smoke test against the real API; run with `-- --ignored`
    #[tokio::test]
    #[ignore = "requires OPENAI_API_KEY and network access"]
    async fn test_live_weather_call() {
        skip_without_env!("OPENAI_API_KEY");

        let generator =
            Generator::new(CatalogFactory::weather(), OpenAiBackend::from_env().unwrap());
        let call = generator
            .generate(
                "What's the weather in Paris?",
                GenerateOptions::new().with_max_new_steps(16),
            )
            .await
            .unwrap();

        assert_eq!(call.name, "get_weather");
    }
}
