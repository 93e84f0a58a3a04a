//! Configuration for the embedding service.

use serde::{Deserialize, Serialize};

use crate::models::EmbeddingModel;

/// Configuration for the embedding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// The embedding model to use
    pub model: EmbeddingModel,

    /// Maximum batch size for embedding generation
    pub batch_size: usize,

    /// Whether to normalize vectors after generation
    pub normalize: bool,

    /// Cache directory for downloaded models
    pub cache_dir: Option<String>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: EmbeddingModel::default(),
            batch_size: 32,
            normalize: true,
            cache_dir: None,
        }
    }
}

impl EmbeddingConfig {
    /// Creates a new configuration with the specified model
    pub fn with_model(model: EmbeddingModel) -> Self {
        Self {
            model,
            ..Default::default()
        }
    }

    /// Sets the batch size
    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Sets whether to normalize vectors
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Sets the cache directory
    pub fn cache_dir(mut self, dir: impl Into<String>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Returns the vector dimension this configuration expects
    pub fn dimension(&self) -> usize {
        self.model.dimension()
    }

    /// Loads configuration from environment variables
    pub fn from_env() -> Self {
        let model = std::env::var("EMBEDDING_MODEL")
            .map(|m| match m.as_str() {
                "bge-small-en-v1.5" => EmbeddingModel::BgeSmallEnV15,
                "all-MiniLM-L6-v2" => EmbeddingModel::AllMiniLmL6V2,
                "nomic-embed-text-v1.5" => EmbeddingModel::NomicEmbedTextV15,
                other => {
                    let dimension = std::env::var("EMBEDDING_DIMENSION")
                        .ok()
                        .and_then(|d| d.parse().ok())
                        .unwrap_or(384);
                    EmbeddingModel::Custom {
                        name: other.to_string(),
                        dimension,
                    }
                }
            })
            .unwrap_or_default();

        let batch_size = std::env::var("EMBEDDING_BATCH_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(32);

        let normalize = std::env::var("EMBEDDING_NORMALIZE")
            .map(|s| s == "true" || s == "1")
            .unwrap_or(true);

        let cache_dir = std::env::var("EMBEDDING_CACHE_DIR").ok();

        Self {
            model,
            batch_size,
            normalize,
            cache_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EmbeddingConfig::default();
        assert_eq!(config.model, EmbeddingModel::BgeSmallEnV15);
        assert_eq!(config.dimension(), 384);
        assert_eq!(config.batch_size, 32);
        assert!(config.normalize);
        assert!(config.cache_dir.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = EmbeddingConfig::with_model(EmbeddingModel::NomicEmbedTextV15)
            .batch_size(64)
            .normalize(false)
            .cache_dir("/tmp/models");

        assert_eq!(config.model, EmbeddingModel::NomicEmbedTextV15);
        assert_eq!(config.dimension(), 768);
        assert_eq!(config.batch_size, 64);
        assert!(!config.normalize);
        assert_eq!(config.cache_dir, Some("/tmp/models".to_string()));
    }
}
