//! manualdex: ingestion and semantic search engine for device manuals.
//!
//! Uploaded manuals are extracted page by page, each non-blank page is
//! embedded into a fixed-dimension vector, and the resulting fragments are
//! indexed for k-nearest-neighbor search by cosine similarity.
//!
//! The crate exposes the pipeline's core; HTTP routing, relational
//! persistence, and blob storage are external collaborators consumed
//! through the narrow [`store::DocumentStore`] interface.

pub mod embeddings;
pub mod error;
pub mod extract;
pub mod index;
pub mod ingest;
pub mod models;
pub mod search;
pub mod store;

// Re-export the main types
pub use error::{
    EmbedError, Error, ExtractError, IndexError, IngestError, Result, SearchError, StoreError,
};
pub use models::{
    DeviceId, Document, DocumentDraft, DocumentId, EmbeddingModel, EmbeddingVector, Fragment,
    FragmentId, ValidationError,
};

// Extraction exports
pub use extract::{ExtractorFactory, Page, PageExtractor, TextPageExtractor};

// Embedding service exports
pub use embeddings::{
    BatchEmbeddingResult, EmbeddingConfig, EmbeddingProvider, EmbeddingResult, EmbeddingService,
    MockEmbeddingProvider,
};

// Index and search exports
pub use index::{SearchFilter, SearchMatch, VectorIndex};
pub use search::{SearchHit, SearchService};

// Ingestion exports
pub use ingest::{IngestionConfig, IngestionReport, IngestionService, IngestionStatus};

// Document store exports
pub use store::{DocumentStore, MemoryDocumentStore};
