//! The ingestion orchestrator.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::embeddings::EmbeddingService;
use crate::error::{ExtractError, IngestError, StoreError};
use crate::extract::ExtractorFactory;
use crate::index::VectorIndex;
use crate::models::{DocumentId, Fragment};
use crate::store::DocumentStore;

use super::config::IngestionConfig;

/// Terminal status of one ingestion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestionStatus {
    /// Every page was processed and the document reference was recorded.
    Completed,
    /// A cancellation request stopped the run between pages; committed
    /// fragments remain.
    Cancelled,
    /// A fatal condition stopped the run; see the report's error.
    Aborted,
}

/// Outcome of one ingestion run.
///
/// Fatal conditions are carried in `error` rather than returned as `Err`,
/// so the caller always sees how far the run got.
#[derive(Debug)]
pub struct IngestionReport {
    /// Document this run was for.
    pub document_id: DocumentId,

    /// Terminal status.
    pub status: IngestionStatus,

    /// Fragments committed to the index by this run.
    pub fragments_written: usize,

    /// Pages produced by extraction (blank pages included).
    pub pages_seen: usize,

    /// The fatal condition, present exactly when status is `Aborted`.
    pub error: Option<IngestError>,
}

impl IngestionReport {
    /// Checks for normal completion.
    pub fn is_completed(&self) -> bool {
        self.status == IngestionStatus::Completed
    }

    /// Checks whether the run was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.status == IngestionStatus::Cancelled
    }

    /// Checks whether the run aborted on a fatal condition.
    pub fn is_aborted(&self) -> bool {
        self.status == IngestionStatus::Aborted
    }
}

/// Orchestrates extraction, embedding, and indexing for one document.
///
/// A single document's pages are processed sequentially in page order;
/// separate documents may be ingested concurrently without coordination.
pub struct IngestionService {
    store: Arc<dyn DocumentStore>,
    embeddings: Arc<EmbeddingService>,
    index: Arc<VectorIndex>,
    config: IngestionConfig,
}

impl IngestionService {
    /// Creates a new ingestion service.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        embeddings: Arc<EmbeddingService>,
        index: Arc<VectorIndex>,
        config: IngestionConfig,
    ) -> Self {
        Self {
            store,
            embeddings,
            index,
            config,
        }
    }

    /// Gets the configuration.
    pub fn config(&self) -> &IngestionConfig {
        &self.config
    }

    /// Ingests one document's bytes into the vector index.
    ///
    /// Runs the pipeline `Pending → Extracting → Indexing → Completed`;
    /// any fatal condition moves the run to `Aborted` with the error and
    /// progress so far in the report. Cancellation is observed between
    /// pages and yields a `Cancelled` report, never an error.
    pub async fn ingest(
        &self,
        document_id: DocumentId,
        data: &[u8],
        cancellation: &CancellationToken,
    ) -> IngestionReport {
        info!(%document_id, bytes = data.len(), "ingestion started");

        // Pending: resolve the document before any extraction work
        let document = match self.store.get_document(document_id).await {
            Ok(document) => document,
            Err(StoreError::NotFound(_)) => {
                warn!(%document_id, "ingestion aborted, document not found");
                return self.aborted(document_id, 0, 0, IngestError::NotFound(document_id));
            }
            Err(source) => {
                return self.aborted(
                    document_id,
                    0,
                    0,
                    IngestError::Store {
                        document_id,
                        source,
                    },
                );
            }
        };

        // Upload guards, checked before the extractor ever runs
        if !self.config.is_size_allowed(data.len()) {
            let source = ExtractError::TooLarge {
                size: data.len(),
                max: self.config.max_file_size,
            };
            return self.aborted(
                document_id,
                0,
                0,
                IngestError::Extraction {
                    document_id,
                    source,
                },
            );
        }
        if !self.config.is_content_type_allowed(&document.content_type) {
            let source = ExtractError::UnsupportedType(document.content_type.clone());
            return self.aborted(
                document_id,
                0,
                0,
                IngestError::Extraction {
                    document_id,
                    source,
                },
            );
        }

        // Extracting: a corrupt document aborts the whole run, no partial
        // page set survives
        debug!(%document_id, content_type = %document.content_type, "extracting pages");
        let extractor = match ExtractorFactory::for_content_type(&document.content_type) {
            Ok(extractor) => extractor,
            Err(source) => {
                return self.aborted(
                    document_id,
                    0,
                    0,
                    IngestError::Extraction {
                        document_id,
                        source,
                    },
                );
            }
        };
        let pages = match extractor.extract(data).await {
            Ok(pages) => pages,
            Err(source) => {
                warn!(%document_id, error = %source, "ingestion aborted during extraction");
                return self.aborted(
                    document_id,
                    0,
                    0,
                    IngestError::Extraction {
                        document_id,
                        source,
                    },
                );
            }
        };
        let pages_seen = pages.len();
        debug!(%document_id, pages = pages_seen, "extraction complete");

        // Indexing: page by page, in page order, cancellation checked
        // between pages
        let mut fragments_written = 0;
        for page in pages {
            if cancellation.is_cancelled() {
                info!(%document_id, fragments_written, "ingestion cancelled");
                return IngestionReport {
                    document_id,
                    status: IngestionStatus::Cancelled,
                    fragments_written,
                    pages_seen,
                    error: None,
                };
            }

            if page.is_blank() {
                debug!(%document_id, page = page.number, "skipping blank page");
                continue;
            }

            let embedding = match self.embeddings.embed(&page.text).await {
                Ok(result) => result.embedding,
                Err(source) => {
                    warn!(%document_id, page = page.number, error = %source, "ingestion aborted during embedding");
                    return self.aborted(
                        document_id,
                        fragments_written,
                        pages_seen,
                        IngestError::Embedding {
                            document_id,
                            page_number: page.number,
                            source,
                        },
                    );
                }
            };

            let mut fragment =
                Fragment::new(document_id, Some(page.number), page.text, embedding);
            if let Some(title) = page.section_title {
                fragment = fragment.with_section_title(title);
            }

            if let Err(source) = self.index.insert(fragment).await {
                return self.aborted(
                    document_id,
                    fragments_written,
                    pages_seen,
                    IngestError::Indexing {
                        document_id,
                        page_number: page.number,
                        source,
                    },
                );
            }
            fragments_written += 1;
        }

        // Completed: record the content-derived reference on the document
        let content_ref = Self::content_reference(data);
        if let Err(source) = self
            .store
            .update_document_reference(document_id, &content_ref)
            .await
        {
            return self.aborted(
                document_id,
                fragments_written,
                pages_seen,
                IngestError::Store {
                    document_id,
                    source,
                },
            );
        }

        info!(%document_id, fragments_written, pages_seen, "ingestion completed");
        IngestionReport {
            document_id,
            status: IngestionStatus::Completed,
            fragments_written,
            pages_seen,
            error: None,
        }
    }

    /// Ingests a document from a file on disk.
    pub async fn ingest_file(
        &self,
        document_id: DocumentId,
        path: &std::path::Path,
        cancellation: &CancellationToken,
    ) -> IngestionReport {
        let data = match tokio::fs::read(path).await {
            Ok(data) => data,
            Err(e) => {
                warn!(%document_id, path = %path.display(), "upload stream unreadable");
                return self.aborted(
                    document_id,
                    0,
                    0,
                    IngestError::Extraction {
                        document_id,
                        source: ExtractError::Io(e),
                    },
                );
            }
        };

        self.ingest(document_id, &data, cancellation).await
    }

    /// Removes a document's fragments from the index, returning the count.
    pub async fn remove_document(&self, document_id: DocumentId) -> usize {
        self.index.delete_by_document(document_id).await
    }

    fn aborted(
        &self,
        document_id: DocumentId,
        fragments_written: usize,
        pages_seen: usize,
        error: IngestError,
    ) -> IngestionReport {
        IngestionReport {
            document_id,
            status: IngestionStatus::Aborted,
            fragments_written,
            pages_seen,
            error: Some(error),
        }
    }

    /// Derives the content reference recorded on completion.
    fn content_reference(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("sha256:{:x}", hasher.finalize())
    }
}
