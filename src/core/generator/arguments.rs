//! Argument generation phase

use tracing::debug;

use crate::core::backends::GenerationBackend;
use crate::core::constraint::JsonSchemaConstraint;
use crate::core::prompt::TextPrompter;
use crate::core::types::GenerationBudget;
use crate::utils::error::{EngineError, Result};

use super::Generator;

impl<B: GenerationBackend, P: TextPrompter> Generator<B, P> {
    /// Generate the JSON argument text for `function_name`
    ///
    /// The name must be in the catalog; an unknown one is
    /// [`EngineError::UnknownFunction`], whether it came from selection or
    /// was pinned by the caller. The backend runs under a schema constraint
    /// built from the function's parameter schema, so the returned text is
    /// already truncated to the complete value on a finished run. An
    /// exhausted budget returns the partial prefix as-is; the caller decides
    /// whether a partial is usable.
    pub async fn build_arguments(
        &self,
        prompt: &str,
        function_name: &str,
        budget: GenerationBudget,
    ) -> Result<String> {
        let spec = self
            .spec(function_name)
            .ok_or_else(|| EngineError::unknown_function(function_name))?;

        let constraint = JsonSchemaConstraint::new(&spec.parameters)?;
        let seed = self
            .prompter
            .argument_generation(prompt, &self.functions, function_name);

        let generated = self
            .constrainer
            .generate(&seed, "", &constraint, budget)
            .await?;
        debug!(
            function = %function_name,
            reason = ?generated.reason,
            chars = generated.text.chars().count(),
            "argument generation finished"
        );

        Ok(generated.into_text())
    }
}
