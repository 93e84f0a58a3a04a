//! Document store collaborator interface.
//!
//! Durable storage of document metadata lives outside the core; the
//! ingestion orchestrator only ever needs to resolve a document and to
//! record the content-derived reference once ingestion completes. This
//! module defines that narrow interface plus an in-memory implementation
//! for tests and embedding.

pub mod memory;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{Document, DocumentId};

/// Narrow interface to the external document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Resolves a document by id.
    ///
    /// Returns [`StoreError::NotFound`] when the document does not exist.
    async fn get_document(&self, id: DocumentId) -> Result<Document, StoreError>;

    /// Records the content-derived reference on a document.
    async fn update_document_reference(
        &self,
        id: DocumentId,
        content_ref: &str,
    ) -> Result<(), StoreError>;
}

// Re-exports
pub use memory::MemoryDocumentStore;
