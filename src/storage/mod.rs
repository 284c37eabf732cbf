//! Document sinks.
//!
//! A sink receives every generated document and decides whether to keep it.
//! Deduplication is the sink's responsibility: the generator always calls
//! [`DocumentSink::send_if_new`] and only counts the outcome.
//!
//! ## Local Directory Structure
//!
//! ```text
//! output/
//! └── contents/             # One directory per output layer
//!     ├── <id>.xml          # Document body
//!     └── <id>.json         # URI, id, x_id, layer
//! ```

pub mod local;
pub mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Document;

// Re-export for convenience
pub use local::LocalSink;
pub use memory::MemorySink;

/// What a sink did with a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Document was new and has been stored
    Sent,
    /// A document with the same id already existed; nothing was written
    Duplicate,
}

/// Trait for document sink backends.
#[async_trait]
pub trait DocumentSink: Send + Sync {
    /// Store the document unless one with the same id is already present.
    async fn send_if_new(&self, doc: &Document) -> Result<SendOutcome>;
}
