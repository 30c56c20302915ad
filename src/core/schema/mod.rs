//! JSON Schema ingestion and incremental scanning
//!
//! `node` turns a schema document into a validated tree; `scanner` runs
//! partial candidates against that tree.

pub mod node;
pub mod scanner;

// Re-export main components
pub use node::SchemaNode;
pub use scanner::scan;
