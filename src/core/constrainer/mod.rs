//! Constrained generation loop
//!
//! The driver that turns an unconstrained backend into a grammar-respecting
//! one. It grows a candidate string chunk by chunk, consults a constraint
//! after every append, and stops the moment the candidate completes, breaks,
//! or runs out of budget. Checking the constraint at every step is the whole
//! point: a doomed candidate is abandoned after one bad chunk instead of
//! after a full-length generation.


use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::backends::GenerationBackend;
use crate::core::constraint::Constraint;
use crate::core::types::{Generated, GenerationBudget, StopReason};
use crate::utils::error::{EngineError, Result};

/// Drives a backend under a constraint
///
/// Stateless between runs; a single instance may serve any number of
/// sequential `generate` calls, and separate calls on separate tasks share
/// no mutable state.
pub struct Constrainer<B> {
    backend: B,
}

impl<B: GenerationBackend> Constrainer<B> {
    /// Wrap a generation backend
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The wrapped backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Grow `seed` under `constraint` until it completes or a limit stops it
    ///
    /// The backend is seeded with `prompt` + candidate each step; the
    /// constraint only ever sees the candidate. On completion the returned
    /// text is truncated to the end of the valid value, discarding trailing
    /// noise. A candidate the constraint rejects becomes
    /// [`EngineError::ConstraintRejected`]; retrying with fresh sampling is
    /// the caller's decision. Budget caps and a backend with nothing more to
    /// say end the run with [`StopReason::Exhausted`] and the candidate
    /// as-is.
    pub async fn generate<C>(
        &self,
        prompt: &str,
        seed: &str,
        constraint: &C,
        budget: GenerationBudget,
    ) -> Result<Generated>
    where
        C: Constraint + ?Sized,
    {
        let call_id = format!("constrain-{}", Uuid::new_v4());
        let mut candidate = seed.to_string();

        // Zeroth check: a seed may already be decided, and neither case
        // should cost a backend call.
        let verdict = constraint.check(&candidate);
        if verdict.is_complete {
            return Ok(Self::completed(call_id, candidate, verdict.complete_end_offset, 0));
        }
        if !verdict.is_prefix_valid {
            warn!(call = %call_id, "seed rejected before any extension");
            return Err(EngineError::rejected(candidate));
        }

        let mut steps = 0usize;
        loop {
            let chars = candidate.chars().count();
            if budget.steps_spent(steps) || budget.length_spent(chars) {
                info!(call = %call_id, steps, chars, "budget spent before completion");
                return Ok(Generated {
                    text: candidate,
                    reason: StopReason::Exhausted,
                });
            }

            let seeded = format!("{prompt}{candidate}");
            let chunk = self
                .backend
                .extend(&seeded, budget.remaining_chars(chars))
                .await?;
            steps += 1;

            if chunk.is_empty() {
                info!(call = %call_id, steps, chars, "backend had nothing further");
                return Ok(Generated {
                    text: candidate,
                    reason: StopReason::Exhausted,
                });
            }

            candidate.push_str(&chunk);
            debug!(
                call = %call_id,
                step = steps,
                chunk_chars = chunk.chars().count(),
                candidate_chars = candidate.chars().count(),
                "appended extension chunk"
            );

            let verdict = constraint.check(&candidate);
            if verdict.is_complete {
                return Ok(Self::completed(
                    call_id,
                    candidate,
                    verdict.complete_end_offset,
                    steps,
                ));
            }
            if !verdict.is_prefix_valid {
                warn!(
                    call = %call_id,
                    step = steps,
                    candidate = %crate::utils::truncate_string(&candidate, 80),
                    "candidate rejected by constraint"
                );
                return Err(EngineError::rejected(candidate));
            }
        }
    }

    /// Finish a run whose candidate holds a complete value
    fn completed(
        call_id: String,
        mut candidate: String,
        end_offset: Option<usize>,
        steps: usize,
    ) -> Generated {
        if let Some(end) = end_offset {
            candidate.truncate(end);
        }
        info!(
            call = %call_id,
            steps,
            chars = candidate.chars().count(),
            "generation complete"
        );
        Generated {
            text: candidate,
            reason: StopReason::Complete,
        }
    }
}
