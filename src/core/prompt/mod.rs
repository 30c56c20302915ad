//! Prompt formatting for the two generation phases
//!
//! The engine never composes prose itself; a prompter turns the user prompt
//! and the function catalog into the seed text fed to the backend. The
//! output is treated as opaque, so alternative templates (chat markup,
//! few-shot, another language) drop in without touching the engine.

use crate::core::types::FunctionSpec;

/// Formats the backend seed text for each phase
pub trait TextPrompter: Send + Sync {
    /// Prefix seeding the choice of a function name
    ///
    /// The backend's continuation is checked against the declared names, so
    /// the prefix should end exactly where the name is expected to start.
    fn function_selection(&self, prompt: &str, functions: &[FunctionSpec]) -> String;

    /// Prefix seeding the argument value for `selected`
    ///
    /// The continuation is checked against the function's parameter schema,
    /// so the prefix should end exactly where the JSON value is expected to
    /// start.
    fn argument_generation(
        &self,
        prompt: &str,
        functions: &[FunctionSpec],
        selected: &str,
    ) -> String;
}

/// Instruction-style default template
///
/// Lists the catalog as pretty-printed JSON and ends each phase mid-line so
/// the model continues with the expected value.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPrompter;

impl DefaultPrompter {
    fn render_catalog(functions: &[FunctionSpec]) -> String {
        serde_json::to_string_pretty(functions).unwrap_or_else(|_| "[]".to_string())
    }
}

impl TextPrompter for DefaultPrompter {
    fn function_selection(&self, prompt: &str, functions: &[FunctionSpec]) -> String {
        format!(
            "You have access to the following functions:\n{catalog}\n\n\
             Help with the request below by calling one of them.\n\n\
             Request: {prompt}\n\
             Function to call: ",
            catalog = Self::render_catalog(functions),
        )
    }

    fn argument_generation(
        &self,
        prompt: &str,
        functions: &[FunctionSpec],
        selected: &str,
    ) -> String {
        format!(
            "You have access to the following functions:\n{catalog}\n\n\
             Help with the request below by calling {selected}.\n\n\
             Request: {prompt}\n\
             Arguments for {selected}, as JSON matching its parameter schema: ",
            catalog = Self::render_catalog(functions),
        )
    }
}
