//! In-memory sink for embedding hosts and tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Document;
use crate::storage::{DocumentSink, SendOutcome};

/// Keeps accepted documents in insertion order, keyed by id.
#[derive(Debug, Default)]
pub struct MemorySink {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    order: Vec<String>,
    docs: HashMap<String, Document>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepted documents, in the order they were sent.
    pub fn documents(&self) -> Vec<Document> {
        let inner = self.lock();
        inner
            .order
            .iter()
            .filter_map(|id| inner.docs.get(id).cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock only means another sender panicked mid-insert.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl DocumentSink for MemorySink {
    async fn send_if_new(&self, doc: &Document) -> Result<SendOutcome> {
        let mut inner = self.lock();
        if inner.docs.contains_key(&doc.id) {
            return Ok(SendOutcome::Duplicate);
        }
        inner.order.push(doc.id.clone());
        inner.docs.insert(doc.id.clone(), doc.clone());
        Ok(SendOutcome::Sent)
    }
}
