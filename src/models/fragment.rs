//! Indexed fragments: one searchable unit of text, typically a page.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::document::DocumentId;
use super::embedding::EmbeddingVector;

/// Identity of an indexed fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FragmentId(Uuid);

impl FragmentId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for FragmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FragmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One indexed unit of text belonging to exactly one document.
///
/// Fragments are immutable once written; they only disappear when their
/// owning document's fragments are deleted as a whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fragment {
    /// Fragment identity.
    pub id: FragmentId,

    /// Owning document.
    pub document_id: DocumentId,

    /// 1-based page number; None for non-paginated sources.
    pub page_number: Option<u32>,

    /// Chapter or section title, if known.
    pub section_title: Option<String>,

    /// Text content (non-empty).
    pub content: String,

    /// Embedding of the content.
    pub embedding: EmbeddingVector,
}

impl Fragment {
    /// Creates a new fragment.
    pub fn new(
        document_id: DocumentId,
        page_number: Option<u32>,
        content: String,
        embedding: EmbeddingVector,
    ) -> Self {
        Self {
            id: FragmentId::new(),
            document_id,
            page_number,
            section_title: None,
            content,
            embedding,
        }
    }

    /// Sets the section title.
    pub fn with_section_title(mut self, title: impl Into<String>) -> Self {
        self.section_title = Some(title.into());
        self
    }

    /// Returns a snippet of the content, truncated at a char boundary.
    pub fn snippet(&self, max_chars: usize) -> String {
        if self.content.chars().count() <= max_chars {
            return self.content.clone();
        }
        self.content.chars().take(max_chars).collect()
    }
}
