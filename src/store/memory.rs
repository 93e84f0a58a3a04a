//! In-memory document store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::StoreError;
use crate::models::{Document, DocumentId};

use super::DocumentStore;

/// In-memory document store for tests and development.
#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: Arc<RwLock<HashMap<DocumentId, Document>>>,
}

impl MemoryDocumentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document, returning its id.
    pub async fn add(&self, document: Document) -> DocumentId {
        let id = document.id;
        self.documents.write().await.insert(id, document);
        debug!(%id, "document stored");
        id
    }

    /// Removes a document.
    pub async fn remove(&self, id: DocumentId) -> bool {
        self.documents.write().await.remove(&id).is_some()
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Checks whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get_document(&self, id: DocumentId) -> Result<Document, StoreError> {
        self.documents
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn update_document_reference(
        &self,
        id: DocumentId,
        content_ref: &str,
    ) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        let document = documents.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        document.content_ref = Some(content_ref.to_string());
        debug!(%id, content_ref, "document reference updated");
        Ok(())
    }
}
