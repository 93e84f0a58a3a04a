//! Embedding service for generating text embeddings.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::EmbedError;
use crate::models::EmbeddingVector;

use super::config::EmbeddingConfig;
use super::mock_provider::MockEmbeddingProvider;
use super::provider::{BatchEmbeddingResult, EmbeddingProvider, EmbeddingResult};

/// Main embedding service
///
/// Wraps a provider and enforces the configured vector dimension: a backend
/// returning a wrong-length vector surfaces as
/// [`EmbedError::DimensionMismatch`] before the vector reaches any index.
pub struct EmbeddingService {
    /// The embedding provider
    provider: Arc<dyn EmbeddingProvider>,

    /// Service configuration
    config: EmbeddingConfig,
}

impl EmbeddingService {
    /// Creates a new embedding service with the given provider
    pub fn new(provider: Arc<dyn EmbeddingProvider>, config: EmbeddingConfig) -> Self {
        info!(
            provider = provider.provider_name(),
            model = config.model.model_name(),
            dimension = config.dimension(),
            "embedding service initialized"
        );
        Self { provider, config }
    }

    /// Creates a new embedding service with a mock provider (for testing)
    pub fn with_mock(config: EmbeddingConfig) -> Self {
        let provider = MockEmbeddingProvider::new(config.model.clone());
        Self::new(Arc::new(provider), config)
    }

    /// Creates a new embedding service with a FastEmbed provider
    #[cfg(feature = "embeddings")]
    pub fn with_fastembed(config: EmbeddingConfig) -> Result<Self, EmbedError> {
        use super::fastembed_provider::FastEmbedProvider;

        let provider = FastEmbedProvider::new(config.clone())?;
        Ok(Self::new(Arc::new(provider), config))
    }

    /// Generates an embedding for a single text
    pub async fn embed(&self, text: &str) -> Result<EmbeddingResult, EmbedError> {
        if text.trim().is_empty() {
            return Err(EmbedError::EmptyText);
        }

        debug!(chars = text.len(), "generating embedding");
        let result = self.provider.embed(text).await?;
        self.check_dimension(&result.embedding)?;
        Ok(result)
    }

    /// Generates embeddings for multiple texts
    pub async fn embed_batch(
        &self,
        texts: &[String],
    ) -> Result<BatchEmbeddingResult, EmbedError> {
        let non_empty: Vec<String> = texts
            .iter()
            .filter(|t| !t.trim().is_empty())
            .cloned()
            .collect();

        if non_empty.len() != texts.len() {
            warn!(
                filtered = texts.len() - non_empty.len(),
                total = texts.len(),
                "filtered empty texts from batch"
            );
        }

        if non_empty.is_empty() {
            return Ok(BatchEmbeddingResult {
                embeddings: vec![],
                latency_ms: 0,
                count: 0,
            });
        }

        debug!(count = non_empty.len(), "generating batch embeddings");
        let result = self.provider.embed_batch(&non_empty).await?;
        for embedding in &result.embeddings {
            self.check_dimension(embedding)?;
        }
        Ok(result)
    }

    /// Generates an embedding and returns only the vector
    pub async fn embed_to_vector(&self, text: &str) -> Result<EmbeddingVector, EmbedError> {
        let result = self.embed(text).await?;
        Ok(result.embedding)
    }

    /// Returns the expected embedding dimension
    pub fn dimension(&self) -> usize {
        self.config.dimension()
    }

    /// Returns the provider name
    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Checks if the underlying provider is healthy
    pub async fn health_check(&self) -> Result<bool, EmbedError> {
        self.provider.health_check().await
    }

    /// Returns the configuration
    pub fn config(&self) -> &EmbeddingConfig {
        &self.config
    }

    fn check_dimension(&self, embedding: &EmbeddingVector) -> Result<(), EmbedError> {
        let expected = self.config.dimension();
        if embedding.dimension != expected {
            return Err(EmbedError::DimensionMismatch {
                expected,
                actual: embedding.dimension,
            });
        }
        Ok(())
    }
}
