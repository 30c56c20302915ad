//! Deterministic scripted backend
//!
//! Replays a fixed sequence of extension chunks, one per call, and records
//! every prefix it was shown. This is the mock strategy for the whole test
//! suite: scripts make the generation loop fully reproducible without a
//! model behind it.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::core::backends::GenerationBackend;
use crate::utils::error::Result;

/// Backend that replays a scripted chunk sequence
///
/// Once the script runs dry every further call returns an empty chunk,
/// which the generation loop treats as source exhaustion.
pub struct ScriptedBackend {
    script: Mutex<VecDeque<String>>,
    seen: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    /// Script a sequence of chunks to replay in order
    pub fn new<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: Mutex::new(chunks.into_iter().map(Into::into).collect()),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// A backend with nothing to say
    pub fn silent() -> Self {
        Self::new(Vec::<String>::new())
    }

    /// Every prefix passed to [`extend`](GenerationBackend::extend), in call order
    pub fn prefixes_seen(&self) -> Vec<String> {
        self.seen.lock().clone()
    }

    /// Number of calls made so far
    pub fn calls(&self) -> usize {
        self.seen.lock().len()
    }

    /// Chunks left in the script
    pub fn remaining(&self) -> usize {
        self.script.lock().len()
    }
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    async fn extend(&self, prefix: &str, _limit: Option<usize>) -> Result<String> {
        self.seen.lock().push(prefix.to_string());
        Ok(self.script.lock().pop_front().unwrap_or_default())
    }
}
