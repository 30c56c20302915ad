//! Generation backends
//!
//! A backend is the injected text source the engine drives. The engine only
//! needs one capability from it: extend a prefix with freshly generated
//! text. Tokenization, sampling, and transport are the backend's business.

pub mod openai;
pub mod scripted;

// Re-export main components
pub use openai::{OpenAiBackend, OpenAiConfig};
pub use scripted::ScriptedBackend;

use async_trait::async_trait;

use crate::utils::error::Result;

/// Incremental text source
///
/// `extend` returns only the newly produced suffix, never the prefix back.
/// Repeated calls with a growing prefix must be semantically equivalent to
/// one long continuation; no tokenization granularity is assumed beyond
/// output being appendable text. An empty suffix means the backend has
/// nothing further to add.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Produce the next chunk continuing `prefix`
    ///
    /// `limit` is a character-count hint derived from the caller's remaining
    /// length budget; backends may use it to size the chunk but are not
    /// required to honor it exactly.
    async fn extend(&self, prefix: &str, limit: Option<usize>) -> Result<String>;
}

#[async_trait]
impl<B: GenerationBackend + ?Sized> GenerationBackend for &B {
    async fn extend(&self, prefix: &str, limit: Option<usize>) -> Result<String> {
        (**self).extend(prefix, limit).await
    }
}
