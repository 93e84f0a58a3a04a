//! Document ingestion orchestration.
//!
//! Ingestion drives the full pipeline for one document: resolve it in the
//! document store, extract its pages, embed each non-blank page, and insert
//! the resulting fragments into the vector index. On normal completion a
//! content-derived reference is recorded on the document.
//!
//! # Example
//!
//! ```ignore
//! use manualdex::ingest::{IngestionConfig, IngestionService};
//! use tokio_util::sync::CancellationToken;
//!
//! let service = IngestionService::new(store, embeddings, index, IngestionConfig::default());
//! let report = service.ingest(document_id, &bytes, &CancellationToken::new()).await;
//! assert!(report.is_completed());
//! println!("{} fragments written", report.fragments_written);
//! ```
//!
//! Cancellation is cooperative: it is observed between pages, never
//! mid-page, and produces a `Cancelled` report with every fragment that was
//! already committed left in place.

pub mod config;
pub mod service;

// Re-exports
pub use config::IngestionConfig;
pub use service::{IngestionReport, IngestionService, IngestionStatus};
