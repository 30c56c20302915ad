//! Function-calling generator
//!
//! The caller-facing facade: a function catalog, a constrained generation
//! loop, and a prompter, combined into "pick a function, then produce its
//! arguments". The two phases live in their own files; this file holds the
//! type, construction, and the end-to-end entry point.

pub mod arguments;
pub mod selection;

use tracing::{debug, info};

use crate::core::backends::GenerationBackend;
use crate::core::constrainer::Constrainer;
use crate::core::prompt::{DefaultPrompter, TextPrompter};
use crate::core::types::{FunctionCall, FunctionSpec, GenerateOptions};
use crate::utils::error::Result;

/// Drives a backend to produce a structured function call
///
/// Holds the catalog for the duration of a request; the catalog is never
/// mutated, so one generator can serve sequential calls for the same set of
/// functions.
pub struct Generator<B, P = DefaultPrompter> {
    pub(crate) functions: Vec<FunctionSpec>,
    pub(crate) constrainer: Constrainer<B>,
    pub(crate) prompter: P,
}

impl<B: GenerationBackend> Generator<B> {
    /// Create a generator over a catalog with the default prompt template
    pub fn new(functions: Vec<FunctionSpec>, backend: B) -> Self {
        Self::with_prompter(functions, backend, DefaultPrompter)
    }
}

impl<B: GenerationBackend, P: TextPrompter> Generator<B, P> {
    /// Create a generator with a custom prompt template
    pub fn with_prompter(functions: Vec<FunctionSpec>, backend: B, prompter: P) -> Self {
        Self {
            functions,
            constrainer: Constrainer::new(backend),
            prompter,
        }
    }

    /// The function catalog, in declaration order
    pub fn functions(&self) -> &[FunctionSpec] {
        &self.functions
    }

    /// The wrapped generation backend
    pub fn backend(&self) -> &B {
        self.constrainer.backend()
    }

    /// Look up a catalog entry by name
    pub(crate) fn spec(&self, name: &str) -> Option<&FunctionSpec> {
        self.functions.iter().find(|spec| spec.name == name)
    }

    /// Produce a complete function call for `prompt`
    ///
    /// Selects a function (or takes `options.function_call` verbatim,
    /// skipping selection), then generates its arguments under the options'
    /// budget. An explicit name that is not in the catalog surfaces as
    /// [`EngineError::UnknownFunction`](crate::utils::error::EngineError::UnknownFunction)
    /// from the argument phase.
    pub async fn generate(&self, prompt: &str, options: GenerateOptions) -> Result<FunctionCall> {
        let name = match options.function_call {
            Some(ref name) => {
                debug!(function = %name, "function pinned by caller, skipping selection");
                name.clone()
            }
            None => self.choose_function(prompt).await?,
        };

        let parameters = self.build_arguments(prompt, &name, options.budget()).await?;
        info!(
            function = %name,
            parameter_chars = parameters.chars().count(),
            "function call generated"
        );
        Ok(FunctionCall { name, parameters })
    }
}
