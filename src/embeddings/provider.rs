//! Embedding provider trait for abstraction over different backends.

use async_trait::async_trait;

use crate::error::EmbedError;
use crate::models::EmbeddingVector;

/// Result of an embedding operation
#[derive(Debug, Clone)]
pub struct EmbeddingResult {
    /// The generated embedding vector
    pub embedding: EmbeddingVector,

    /// Processing time in milliseconds
    pub latency_ms: u64,
}

/// Batch embedding result
#[derive(Debug, Clone)]
pub struct BatchEmbeddingResult {
    /// The generated embedding vectors, one per input text
    pub embeddings: Vec<EmbeddingVector>,

    /// Total processing time in milliseconds
    pub latency_ms: u64,

    /// Number of texts processed
    pub count: usize,
}

/// Trait for embedding providers
///
/// Implementations must be stateless and deterministic for a fixed model,
/// and safe to invoke concurrently for different inputs. The single-item
/// form is defined as the batched form over a singleton.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generates an embedding for a single text
    async fn embed(&self, text: &str) -> Result<EmbeddingResult, EmbedError>;

    /// Generates embeddings for multiple texts in batch
    async fn embed_batch(&self, texts: &[String]) -> Result<BatchEmbeddingResult, EmbedError>;

    /// Returns the dimension of the generated embeddings
    fn dimension(&self) -> usize;

    /// Checks if the provider is healthy and ready
    async fn health_check(&self) -> Result<bool, EmbedError>;

    /// Returns the provider name for logging
    fn provider_name(&self) -> &str;
}
