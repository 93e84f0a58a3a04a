//! In-memory vector index with brute-force similarity search.
//!
//! The index stores `(fragment, vector)` pairs and answers k-nearest-neighbor
//! queries by cosine similarity. It is append-only: entries never change once
//! written and only disappear through [`VectorIndex::delete_by_document`].
//!
//! Queries run against a consistent snapshot while writers insert; a fragment
//! is visible to every query started after its `insert` returned. The
//! interface deliberately hides the brute-force cost so an approximate
//! structure can replace it without touching callers.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::error::IndexError;
use crate::models::{DocumentId, EmbeddingVector, Fragment, FragmentId};

/// Scope restriction for a query, applied before ranking.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    /// Restrict results to fragments of this document.
    pub document_id: Option<DocumentId>,
}

impl SearchFilter {
    /// No restriction; the whole index is searched.
    pub fn none() -> Self {
        Self::default()
    }

    /// Restricts the search to one document.
    pub fn document(document_id: DocumentId) -> Self {
        Self {
            document_id: Some(document_id),
        }
    }

    fn matches(&self, fragment: &Fragment) -> bool {
        match self.document_id {
            Some(id) => fragment.document_id == id,
            None => true,
        }
    }
}

/// One ranked query result.
#[derive(Debug, Clone)]
pub struct SearchMatch {
    /// The matched fragment.
    pub fragment: Fragment,

    /// Cosine similarity to the query vector.
    pub score: f32,
}

/// Entries in insertion order plus an id set for duplicate detection.
#[derive(Default)]
struct IndexState {
    entries: Vec<Fragment>,
    ids: HashSet<FragmentId>,
}

/// In-memory vector index over document fragments.
pub struct VectorIndex {
    dimension: usize,
    state: Arc<RwLock<IndexState>>,
}

impl VectorIndex {
    /// Creates an empty index for vectors of the given dimension.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            state: Arc::new(RwLock::new(IndexState::default())),
        }
    }

    /// Returns the vector dimension this index accepts.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Inserts one fragment.
    pub async fn insert(&self, fragment: Fragment) -> Result<(), IndexError> {
        self.insert_batch(vec![fragment]).await.map(|_| ())
    }

    /// Inserts a batch of fragments, all or nothing.
    ///
    /// The whole batch is validated before anything is appended, so a bad
    /// fragment in the middle never leaves a partial batch behind.
    pub async fn insert_batch(&self, fragments: Vec<Fragment>) -> Result<usize, IndexError> {
        let mut state = self.state.write().await;

        let mut batch_ids = HashSet::with_capacity(fragments.len());
        for fragment in &fragments {
            if fragment.embedding.dimension != self.dimension {
                return Err(IndexError::DimensionMismatch {
                    expected: self.dimension,
                    actual: fragment.embedding.dimension,
                });
            }
            if fragment.content.trim().is_empty() {
                return Err(IndexError::EmptyContent);
            }
            if state.ids.contains(&fragment.id) || !batch_ids.insert(fragment.id) {
                return Err(IndexError::DuplicateFragment(fragment.id.as_uuid()));
            }
        }

        let count = fragments.len();
        for fragment in fragments {
            state.ids.insert(fragment.id);
            state.entries.push(fragment);
        }

        debug!(inserted = count, total = state.entries.len(), "indexed fragments");
        Ok(count)
    }

    /// Returns the `k` fragments most similar to the query vector.
    ///
    /// Results are ranked by cosine similarity descending; ties are broken
    /// by insertion order (earlier-inserted first). The filter is applied
    /// before ranking, so a filtered query never returns out-of-scope
    /// fragments regardless of their scores.
    pub async fn query(
        &self,
        vector: &EmbeddingVector,
        k: usize,
        filter: &SearchFilter,
    ) -> Result<Vec<SearchMatch>, IndexError> {
        if vector.dimension != self.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.dimension,
            });
        }

        let state = self.state.read().await;

        let mut matches: Vec<SearchMatch> = state
            .entries
            .iter()
            .filter(|fragment| filter.matches(fragment))
            .map(|fragment| SearchMatch {
                fragment: fragment.clone(),
                score: vector.cosine_similarity(&fragment.embedding),
            })
            .collect();

        // Stable sort over insertion-ordered entries keeps ties deterministic
        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(k);

        debug!(candidates = state.entries.len(), returned = matches.len(), "index query");
        Ok(matches)
    }

    /// Removes all fragments of one document, returning how many were removed.
    pub async fn delete_by_document(&self, document_id: DocumentId) -> usize {
        let mut guard = self.state.write().await;
        let state = &mut *guard;

        let before = state.entries.len();
        state
            .entries
            .retain(|fragment| fragment.document_id != document_id);
        let deleted = before - state.entries.len();
        state.ids = state.entries.iter().map(|fragment| fragment.id).collect();

        debug!(%document_id, deleted, "deleted document fragments");
        deleted
    }

    /// Returns one document's fragments in citation order (page ascending).
    pub async fn document_fragments(&self, document_id: DocumentId) -> Vec<Fragment> {
        let state = self.state.read().await;

        let mut fragments: Vec<Fragment> = state
            .entries
            .iter()
            .filter(|fragment| fragment.document_id == document_id)
            .cloned()
            .collect();
        fragments.sort_by_key(|fragment| fragment.page_number);
        fragments
    }

    /// Number of indexed fragments.
    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    /// Checks whether the index is empty.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.entries.is_empty()
    }
}

impl Default for VectorIndex {
    fn default() -> Self {
        Self::new(384)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(document_id: DocumentId, page: u32, vector: Vec<f32>) -> Fragment {
        Fragment::new(
            document_id,
            Some(page),
            format!("page {page} text"),
            EmbeddingVector::new(vector),
        )
    }

    fn query_vector(components: Vec<f32>) -> EmbeddingVector {
        EmbeddingVector::new(components)
    }

    #[tokio::test]
    async fn test_insert_and_len() {
        let index = VectorIndex::new(3);
        let document_id = DocumentId::new();

        assert!(index.is_empty().await);

        index
            .insert(fragment(document_id, 1, vec![1.0, 0.0, 0.0]))
            .await
            .unwrap();
        index
            .insert(fragment(document_id, 2, vec![0.0, 1.0, 0.0]))
            .await
            .unwrap();

        assert_eq!(index.len().await, 2);
    }

    #[tokio::test]
    async fn test_query_ranks_by_similarity_descending() {
        let index = VectorIndex::new(2);
        let document_id = DocumentId::new();

        index
            .insert(fragment(document_id, 1, vec![0.0, 1.0]))
            .await
            .unwrap();
        index
            .insert(fragment(document_id, 2, vec![1.0, 0.0]))
            .await
            .unwrap();
        index
            .insert(fragment(document_id, 3, vec![0.7, 0.7]))
            .await
            .unwrap();

        let matches = index
            .query(&query_vector(vec![1.0, 0.0]), 3, &SearchFilter::none())
            .await
            .unwrap();

        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].fragment.page_number, Some(2));
        assert_eq!(matches[1].fragment.page_number, Some(3));
        assert_eq!(matches[2].fragment.page_number, Some(1));
        assert!(matches[0].score >= matches[1].score);
        assert!(matches[1].score >= matches[2].score);
    }

    #[tokio::test]
    async fn test_self_match_is_top_ranked_with_score_one() {
        let index = VectorIndex::new(3);
        let document_id = DocumentId::new();

        index
            .insert(fragment(document_id, 1, vec![0.2, 0.3, 0.9]))
            .await
            .unwrap();
        index
            .insert(fragment(document_id, 2, vec![0.9, 0.1, 0.0]))
            .await
            .unwrap();

        let matches = index
            .query(&query_vector(vec![0.2, 0.3, 0.9]), 2, &SearchFilter::none())
            .await
            .unwrap();

        assert_eq!(matches[0].fragment.page_number, Some(1));
        assert!((matches[0].score - 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_ties_broken_by_insertion_order() {
        let index = VectorIndex::new(2);
        let document_id = DocumentId::new();

        let first = fragment(document_id, 1, vec![1.0, 0.0]);
        let second = fragment(document_id, 2, vec![2.0, 0.0]); // same direction, same score
        let first_id = first.id;

        index.insert(first).await.unwrap();
        index.insert(second).await.unwrap();

        let matches = index
            .query(&query_vector(vec![1.0, 0.0]), 2, &SearchFilter::none())
            .await
            .unwrap();

        assert!((matches[0].score - matches[1].score).abs() < 1e-6);
        assert_eq!(matches[0].fragment.id, first_id);
    }

    #[tokio::test]
    async fn test_query_respects_k() {
        let index = VectorIndex::new(2);
        let document_id = DocumentId::new();

        for page in 1..=5 {
            index
                .insert(fragment(document_id, page, vec![1.0, page as f32 / 10.0]))
                .await
                .unwrap();
        }

        let matches = index
            .query(&query_vector(vec![1.0, 0.0]), 2, &SearchFilter::none())
            .await
            .unwrap();
        assert_eq!(matches.len(), 2);

        let all = index
            .query(&query_vector(vec![1.0, 0.0]), 100, &SearchFilter::none())
            .await
            .unwrap();
        assert_eq!(all.len(), 5);
    }

    #[tokio::test]
    async fn test_filter_applied_before_ranking() {
        let index = VectorIndex::new(2);
        let target_doc = DocumentId::new();
        let other_doc = DocumentId::new();

        // The other document's fragment matches the query better
        index
            .insert(fragment(other_doc, 1, vec![1.0, 0.0]))
            .await
            .unwrap();
        index
            .insert(fragment(target_doc, 1, vec![0.5, 0.5]))
            .await
            .unwrap();

        let matches = index
            .query(
                &query_vector(vec![1.0, 0.0]),
                1,
                &SearchFilter::document(target_doc),
            )
            .await
            .unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].fragment.document_id, target_doc);
    }

    #[tokio::test]
    async fn test_query_empty_index_returns_empty() {
        let index = VectorIndex::new(2);

        let matches = index
            .query(&query_vector(vec![1.0, 0.0]), 10, &SearchFilter::none())
            .await
            .unwrap();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_query_wrong_dimension_rejected() {
        let index = VectorIndex::new(3);

        let result = index
            .query(&query_vector(vec![1.0, 0.0]), 1, &SearchFilter::none())
            .await;
        assert!(matches!(
            result,
            Err(IndexError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[tokio::test]
    async fn test_insert_wrong_dimension_rejected() {
        let index = VectorIndex::new(3);
        let result = index
            .insert(fragment(DocumentId::new(), 1, vec![1.0, 0.0]))
            .await;

        assert!(matches!(result, Err(IndexError::DimensionMismatch { .. })));
        assert!(index.is_empty().await);
    }

    #[tokio::test]
    async fn test_insert_empty_content_rejected() {
        let index = VectorIndex::new(2);
        let bad = Fragment::new(
            DocumentId::new(),
            Some(1),
            "   ".to_string(),
            EmbeddingVector::new(vec![1.0, 0.0]),
        );

        assert!(matches!(
            index.insert(bad).await,
            Err(IndexError::EmptyContent)
        ));
    }

    #[tokio::test]
    async fn test_insert_duplicate_rejected() {
        let index = VectorIndex::new(2);
        let entry = fragment(DocumentId::new(), 1, vec![1.0, 0.0]);
        let duplicate = entry.clone();

        index.insert(entry).await.unwrap();
        assert!(matches!(
            index.insert(duplicate).await,
            Err(IndexError::DuplicateFragment(_))
        ));
        assert_eq!(index.len().await, 1);
    }

    #[tokio::test]
    async fn test_insert_batch_is_atomic() {
        let index = VectorIndex::new(2);
        let document_id = DocumentId::new();

        let batch = vec![
            fragment(document_id, 1, vec![1.0, 0.0]),
            fragment(document_id, 2, vec![1.0, 0.0, 0.0]), // wrong dimension
        ];

        assert!(index.insert_batch(batch).await.is_err());
        assert!(index.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_by_document_cascades() {
        let index = VectorIndex::new(2);
        let keep_doc = DocumentId::new();
        let drop_doc = DocumentId::new();

        index
            .insert(fragment(keep_doc, 1, vec![1.0, 0.0]))
            .await
            .unwrap();
        index
            .insert(fragment(drop_doc, 1, vec![0.0, 1.0]))
            .await
            .unwrap();
        index
            .insert(fragment(drop_doc, 2, vec![0.5, 0.5]))
            .await
            .unwrap();

        let deleted = index.delete_by_document(drop_doc).await;

        assert_eq!(deleted, 2);
        assert_eq!(index.len().await, 1);
        assert!(index.document_fragments(drop_doc).await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_frees_ids_for_reinsertion() {
        let index = VectorIndex::new(2);
        let document_id = DocumentId::new();
        let entry = fragment(document_id, 1, vec![1.0, 0.0]);
        let again = entry.clone();

        index.insert(entry).await.unwrap();
        index.delete_by_document(document_id).await;
        index.insert(again).await.unwrap();

        assert_eq!(index.len().await, 1);
    }

    #[tokio::test]
    async fn test_document_fragments_in_page_order() {
        let index = VectorIndex::new(2);
        let document_id = DocumentId::new();

        index
            .insert(fragment(document_id, 3, vec![1.0, 0.0]))
            .await
            .unwrap();
        index
            .insert(fragment(document_id, 1, vec![0.0, 1.0]))
            .await
            .unwrap();
        index
            .insert(fragment(document_id, 2, vec![0.5, 0.5]))
            .await
            .unwrap();

        let fragments = index.document_fragments(document_id).await;
        let pages: Vec<Option<u32>> = fragments.iter().map(|f| f.page_number).collect();
        assert_eq!(pages, vec![Some(1), Some(2), Some(3)]);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_and_queries() {
        let index = Arc::new(VectorIndex::new(2));
        let document_id = DocumentId::new();

        let mut handles = Vec::new();
        for page in 1..=20u32 {
            let index = Arc::clone(&index);
            handles.push(tokio::spawn(async move {
                index
                    .insert(fragment(document_id, page, vec![1.0, page as f32]))
                    .await
                    .unwrap();
            }));
        }
        for _ in 0..10 {
            let index = Arc::clone(&index);
            handles.push(tokio::spawn(async move {
                // Concurrent readers must always see a consistent snapshot
                let matches = index
                    .query(&query_vector(vec![1.0, 0.0]), 50, &SearchFilter::none())
                    .await
                    .unwrap();
                for window in matches.windows(2) {
                    assert!(window[0].score >= window[1].score);
                }
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(index.len().await, 20);
    }
}
