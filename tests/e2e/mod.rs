//! End-to-end tests
//!
//! Exercises the OpenAI-compatible backend over HTTP. Mock-server tests run
//! by default; live-API tests are `#[ignore]`d and need `OPENAI_API_KEY`.

pub mod openai_backend;
