//! Error types for manualdex.

use thiserror::Error;

use crate::models::DocumentId;

/// Main error type for manualdex operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Page extraction failed
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractError),

    /// Embedding generation failed
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbedError),

    /// Vector index operation failed
    #[error("index error: {0}")]
    Index(#[from] IndexError),

    /// Document store operation failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Ingestion failed
    #[error("ingestion error: {0}")]
    Ingest(#[from] IngestError),

    /// Search failed
    #[error("search error: {0}")]
    Search(#[from] SearchError),

    /// I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Page extraction errors.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("unsupported content type: {0}")]
    UnsupportedType(String),

    #[error("malformed document: {0}")]
    Malformed(String),

    #[error("document too large: {size} bytes, max {max}")]
    TooLarge { size: usize, max: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Embedding generation errors.
#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("cannot embed empty text")]
    EmptyText,

    #[error("wrong embedding dimension: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("embedding provider failed: {0}")]
    Provider(String),
}

/// Vector index errors.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("wrong vector dimension: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("fragment {0} is already indexed")]
    DuplicateFragment(uuid::Uuid),

    #[error("fragment content is empty")]
    EmptyContent,
}

/// Document store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(DocumentId),

    #[error("store backend failed: {0}")]
    Backend(String),
}

/// Ingestion errors.
///
/// Carried inside [`IngestionReport`](crate::ingest::IngestionReport) rather
/// than returned as `Err`, so callers still see how many fragments were
/// committed before the abort.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("document not found: {0}")]
    NotFound(DocumentId),

    #[error("document {document_id}: {source}")]
    Extraction {
        document_id: DocumentId,
        source: ExtractError,
    },

    #[error("document {document_id}, page {page_number}: {source}")]
    Embedding {
        document_id: DocumentId,
        page_number: u32,
        source: EmbedError,
    },

    #[error("document {document_id}, page {page_number}: {source}")]
    Indexing {
        document_id: DocumentId,
        page_number: u32,
        source: IndexError,
    },

    #[error("document {document_id}: {source}")]
    Store {
        document_id: DocumentId,
        source: StoreError,
    },
}

/// Search errors.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("query text is empty")]
    EmptyQuery,

    #[error("query embedding failed: {0}")]
    Embedding(#[from] EmbedError),

    #[error("index query failed: {0}")]
    Index(#[from] IndexError),
}

/// Result type alias for manualdex operations.
pub type Result<T> = std::result::Result<T, Error>;
