//! Function selection phase

use tracing::{debug, warn};

use crate::core::backends::GenerationBackend;
use crate::core::constraint::EnumeratedValueConstraint;
use crate::core::prompt::TextPrompter;
use crate::core::types::GenerationBudget;
use crate::utils::error::Result;

use super::Generator;

impl<B: GenerationBackend, P: TextPrompter> Generator<B, P> {
    /// Choose which catalog function to call for `prompt`
    ///
    /// A single-entry catalog short-circuits without touching the backend;
    /// the choice is forced, so generating it would only spend tokens.
    /// Otherwise the backend runs under an enumerated constraint over the
    /// declared names and the result is canonicalized to the first declared
    /// name it is a prefix of. Generation may legitimately stop at a prefix
    /// shared by several names; declaration order breaks the tie.
    ///
    /// The run is capped at the longest declared name's length. A candidate
    /// that long has either matched a name exactly or overshot one, and an
    /// overshot candidate stays prefix-valid forever, so without the cap a
    /// chatty backend could keep the loop alive indefinitely. Overshoots
    /// still resolve: the candidate starts with the name it ran past.
    pub async fn choose_function(&self, prompt: &str) -> Result<String> {
        if let [only] = self.functions.as_slice() {
            debug!(function = %only.name, "single-entry catalog, selection short-circuited");
            return Ok(only.name.clone());
        }

        let longest = self
            .functions
            .iter()
            .map(|spec| spec.name.chars().count())
            .max()
            .unwrap_or(0);
        let names: Vec<&str> = self.functions.iter().map(|spec| spec.name.as_str()).collect();
        let constraint = EnumeratedValueConstraint::new(names);
        let seed = self.prompter.function_selection(prompt, &self.functions);

        let generated = self
            .constrainer
            .generate(
                &seed,
                "",
                &constraint,
                GenerationBudget::unlimited().with_max_total_length(longest),
            )
            .await?;

        match constraint.resolve(&generated.text) {
            Some(name) => {
                debug!(candidate = %generated.text, function = %name, "selection resolved");
                Ok(name.to_string())
            }
            None => {
                // Rejection semantics should make this unreachable; hand the
                // raw fragment back rather than guessing a name.
                warn!(candidate = %generated.text, "selected candidate matches no declared name");
                Ok(generated.into_text())
            }
        }
    }
}
