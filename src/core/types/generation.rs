//! Generation control and outcome types

use serde::{Deserialize, Serialize};

/// Caps on candidate growth
///
/// The two knobs are independent: `max_total_length` bounds the generated
/// candidate in characters (the prompt does not count), `max_new_steps`
/// bounds the number of backend extension calls. Both are enforced after
/// every single extension; whichever is spent first stops the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationBudget {
    /// Maximum candidate length in characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_total_length: Option<usize>,
    /// Maximum number of extension steps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_new_steps: Option<usize>,
}

impl GenerationBudget {
    /// A budget with no caps
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Cap the candidate length in characters
    pub fn with_max_total_length(mut self, max_total_length: usize) -> Self {
        self.max_total_length = Some(max_total_length);
        self
    }

    /// Cap the number of extension steps
    pub fn with_max_new_steps(mut self, max_new_steps: usize) -> Self {
        self.max_new_steps = Some(max_new_steps);
        self
    }

    /// Whether a candidate of `chars` characters has used up the length cap
    pub fn length_spent(&self, chars: usize) -> bool {
        self.max_total_length.is_some_and(|max| chars >= max)
    }

    /// Whether `steps` extension calls have used up the step cap
    pub fn steps_spent(&self, steps: usize) -> bool {
        self.max_new_steps.is_some_and(|max| steps >= max)
    }

    /// Characters still available under the length cap, if capped
    pub fn remaining_chars(&self, chars: usize) -> Option<usize> {
        self.max_total_length.map(|max| max.saturating_sub(chars))
    }
}

/// Verdict of a constraint over a candidate
///
/// `complete_end_offset` is a byte offset into the candidate marking where a
/// complete valid value ends; it is only ever set together with
/// `is_complete` and always falls on a character boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validation {
    /// The candidate can still grow into a valid instance
    pub is_prefix_valid: bool,
    /// The candidate already contains a full valid instance
    pub is_complete: bool,
    /// Offset where the complete value ends, when trailing bytes may follow
    pub complete_end_offset: Option<usize>,
}

impl Validation {
    /// No continuation can be valid
    pub fn rejected() -> Self {
        Self {
            is_prefix_valid: false,
            is_complete: false,
            complete_end_offset: None,
        }
    }

    /// Valid so far, not yet a full instance
    pub fn incomplete() -> Self {
        Self {
            is_prefix_valid: true,
            is_complete: false,
            complete_end_offset: None,
        }
    }

    /// The whole candidate is a full valid instance
    pub fn complete_whole() -> Self {
        Self {
            is_prefix_valid: true,
            is_complete: true,
            complete_end_offset: None,
        }
    }

    /// A full valid instance ends at byte offset `end`
    pub fn complete_at(end: usize) -> Self {
        Self {
            is_prefix_valid: true,
            is_complete: true,
            complete_end_offset: Some(end),
        }
    }
}

/// Why a generation run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The constraint reported a complete valid instance
    Complete,
    /// A budget cap was reached or the backend had nothing further
    Exhausted,
}

/// Outcome of a generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// The generated candidate, truncated to the completed value when one
    /// was found
    pub text: String,
    /// Why the run stopped
    pub reason: StopReason,
}

impl Generated {
    /// Whether the run ended with a complete valid instance
    pub fn is_complete(&self) -> bool {
        self.reason == StopReason::Complete
    }

    /// Consume the outcome, keeping only the text
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Per-call options for [`Generator::generate`](crate::core::generator::Generator::generate)
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Skip function selection and use this name verbatim
    pub function_call: Option<String>,
    /// Cap on argument text length in characters
    pub max_total_length: Option<usize>,
    /// Cap on backend extension steps
    pub max_new_steps: Option<usize>,
}

impl GenerateOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the function to call, bypassing selection
    pub fn with_function_call(mut self, name: impl Into<String>) -> Self {
        self.function_call = Some(name.into());
        self
    }

    /// Cap the argument text length in characters
    pub fn with_max_total_length(mut self, max_total_length: usize) -> Self {
        self.max_total_length = Some(max_total_length);
        self
    }

    /// Cap the number of extension steps
    pub fn with_max_new_steps(mut self, max_new_steps: usize) -> Self {
        self.max_new_steps = Some(max_new_steps);
        self
    }

    /// The budget these options describe
    pub fn budget(&self) -> GenerationBudget {
        GenerationBudget {
            max_total_length: self.max_total_length,
            max_new_steps: self.max_new_steps,
        }
    }
}
