//! Embedding generation for manualdex.
//!
//! This module turns text fragments and queries into fixed-dimension
//! vectors:
//! - FastEmbed (local, requires the `embeddings` feature)
//! - Mock provider (deterministic, for testing)
//!
//! # Example
//!
//! ```rust,ignore
//! use manualdex::embeddings::{EmbeddingConfig, EmbeddingService};
//!
//! let service = EmbeddingService::with_mock(EmbeddingConfig::default());
//! let result = service.embed("How do I descale the machine?").await?;
//! assert_eq!(result.embedding.dimension, service.dimension());
//! ```

pub mod config;
pub mod mock_provider;
pub mod provider;
pub mod service;

#[cfg(feature = "embeddings")]
pub mod fastembed_provider;

// Re-exports
pub use config::EmbeddingConfig;
pub use mock_provider::MockEmbeddingProvider;
pub use provider::{BatchEmbeddingResult, EmbeddingProvider, EmbeddingResult};
pub use service::EmbeddingService;

#[cfg(feature = "embeddings")]
pub use fastembed_provider::FastEmbedProvider;
