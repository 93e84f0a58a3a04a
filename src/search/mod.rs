//! Semantic search over indexed fragments.
//!
//! The search service is a thin read path: embed the query text, delegate
//! to the vector index, shape the matches for callers. It never mutates
//! any state.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::embeddings::EmbeddingService;
use crate::error::SearchError;
use crate::index::{SearchFilter, VectorIndex};
use crate::models::{DocumentId, FragmentId};

/// Default snippet length in characters.
const DEFAULT_SNIPPET_CHARS: usize = 240;

/// One ranked search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Matched fragment.
    pub fragment_id: FragmentId,

    /// Document the fragment belongs to.
    pub document_id: DocumentId,

    /// 1-based page number, if the source was paginated.
    pub page_number: Option<u32>,

    /// Section title, if known.
    pub section_title: Option<String>,

    /// Leading excerpt of the fragment content.
    pub snippet: String,

    /// Cosine similarity to the query.
    pub score: f32,
}

/// Read-only semantic search over the vector index.
pub struct SearchService {
    embeddings: Arc<EmbeddingService>,
    index: Arc<VectorIndex>,
    snippet_chars: usize,
}

impl SearchService {
    /// Creates a new search service.
    pub fn new(embeddings: Arc<EmbeddingService>, index: Arc<VectorIndex>) -> Self {
        Self {
            embeddings,
            index,
            snippet_chars: DEFAULT_SNIPPET_CHARS,
        }
    }

    /// Sets the snippet length in characters.
    pub fn with_snippet_chars(mut self, chars: usize) -> Self {
        self.snippet_chars = chars;
        self
    }

    /// Searches for the `k` fragments most similar to the query text.
    ///
    /// An empty index yields an empty list, not an error.
    pub async fn search(
        &self,
        query_text: &str,
        k: usize,
        filter: &SearchFilter,
    ) -> Result<Vec<SearchHit>, SearchError> {
        if query_text.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        debug!(chars = query_text.len(), k, "search started");

        let query_embedding = self.embeddings.embed_to_vector(query_text).await?;
        let matches = self.index.query(&query_embedding, k, filter).await?;

        let hits = matches
            .into_iter()
            .map(|m| SearchHit {
                fragment_id: m.fragment.id,
                document_id: m.fragment.document_id,
                page_number: m.fragment.page_number,
                section_title: m.fragment.section_title.clone(),
                snippet: m.fragment.snippet(self.snippet_chars),
                score: m.score,
            })
            .collect::<Vec<_>>();

        debug!(hits = hits.len(), "search finished");
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::{EmbeddingConfig, EmbeddingService, MockEmbeddingProvider};
    use crate::error::EmbedError;
    use crate::models::{EmbeddingModel, Fragment};

    async fn seeded_service() -> (SearchService, DocumentId, DocumentId) {
        let embeddings = Arc::new(EmbeddingService::with_mock(EmbeddingConfig::default()));
        let index = Arc::new(VectorIndex::new(384));

        let doc_a = DocumentId::new();
        let doc_b = DocumentId::new();

        // Index the exact mock embeddings of known texts so queries with the
        // same text self-match at score 1
        for (doc, page, text) in [
            (doc_a, 1, "descaling the coffee machine"),
            (doc_a, 2, "replacing the water filter"),
            (doc_b, 1, "installing the dishwasher rack"),
        ] {
            let vector = embeddings.embed_to_vector(text).await.unwrap();
            index
                .insert(Fragment::new(doc, Some(page), text.to_string(), vector))
                .await
                .unwrap();
        }

        (SearchService::new(embeddings, index), doc_a, doc_b)
    }

    #[tokio::test]
    async fn test_search_self_match_ranks_first() {
        let (service, doc_a, _) = seeded_service().await;

        let hits = service
            .search("descaling the coffee machine", 3, &SearchFilter::none())
            .await
            .unwrap();

        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].document_id, doc_a);
        assert_eq!(hits[0].page_number, Some(1));
        assert!((hits[0].score - 1.0).abs() < 1e-5);
        assert!(hits[0].score >= hits[1].score);
        assert!(hits[1].score >= hits[2].score);
    }

    #[tokio::test]
    async fn test_search_respects_k() {
        let (service, _, _) = seeded_service().await;

        let hits = service
            .search("filter", 1, &SearchFilter::none())
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn test_search_filter_scopes_to_document() {
        let (service, _, doc_b) = seeded_service().await;

        let hits = service
            .search(
                "descaling the coffee machine",
                10,
                &SearchFilter::document(doc_b),
            )
            .await
            .unwrap();

        assert_eq!(hits.len(), 1);
        assert!(hits.iter().all(|hit| hit.document_id == doc_b));
    }

    #[tokio::test]
    async fn test_search_empty_index_returns_empty() {
        let embeddings = Arc::new(EmbeddingService::with_mock(EmbeddingConfig::default()));
        let index = Arc::new(VectorIndex::new(384));
        let service = SearchService::new(embeddings, index);

        let hits = service
            .search("anything", 5, &SearchFilter::none())
            .await
            .unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_search_empty_query_rejected() {
        let (service, _, _) = seeded_service().await;

        assert!(matches!(
            service.search("", 5, &SearchFilter::none()).await,
            Err(SearchError::EmptyQuery)
        ));
        assert!(matches!(
            service.search("  \n ", 5, &SearchFilter::none()).await,
            Err(SearchError::EmptyQuery)
        ));
    }

    #[tokio::test]
    async fn test_search_provider_failure_surfaces() {
        let provider =
            MockEmbeddingProvider::new(EmbeddingModel::BgeSmallEnV15).should_fail(true);
        let embeddings = Arc::new(EmbeddingService::new(
            Arc::new(provider),
            EmbeddingConfig::default(),
        ));
        let service = SearchService::new(embeddings, Arc::new(VectorIndex::new(384)));

        let result = service.search("query", 5, &SearchFilter::none()).await;
        assert!(matches!(
            result,
            Err(SearchError::Embedding(EmbedError::Provider(_)))
        ));
    }

    #[tokio::test]
    async fn test_search_snippet_is_truncated() {
        let embeddings = Arc::new(EmbeddingService::with_mock(EmbeddingConfig::default()));
        let index = Arc::new(VectorIndex::new(384));

        let long_text = "troubleshooting ".repeat(40);
        let vector = embeddings.embed_to_vector(&long_text).await.unwrap();
        index
            .insert(Fragment::new(
                DocumentId::new(),
                Some(1),
                long_text.clone(),
                vector,
            ))
            .await
            .unwrap();

        let service = SearchService::new(embeddings, index).with_snippet_chars(32);
        let hits = service
            .search(&long_text, 1, &SearchFilter::none())
            .await
            .unwrap();

        assert_eq!(hits[0].snippet.chars().count(), 32);
    }

    #[tokio::test]
    async fn test_search_does_not_mutate_index() {
        let (service, _, _) = seeded_service().await;

        service
            .search("water filter", 2, &SearchFilter::none())
            .await
            .unwrap();
        let hits = service
            .search("water filter", 10, &SearchFilter::none())
            .await
            .unwrap();

        assert_eq!(hits.len(), 3);
    }

    #[tokio::test]
    async fn test_search_hit_carries_section_title() {
        let embeddings = Arc::new(EmbeddingService::with_mock(EmbeddingConfig::default()));
        let index = Arc::new(VectorIndex::new(384));

        let vector = embeddings.embed_to_vector("safety first").await.unwrap();
        index
            .insert(
                Fragment::new(
                    DocumentId::new(),
                    Some(1),
                    "safety first".to_string(),
                    vector,
                )
                .with_section_title("Safety"),
            )
            .await
            .unwrap();

        let service = SearchService::new(embeddings, index);
        let hits = service
            .search("safety first", 1, &SearchFilter::none())
            .await
            .unwrap();

        assert_eq!(hits[0].section_title.as_deref(), Some("Safety"));
    }
}
