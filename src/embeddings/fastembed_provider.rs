//! FastEmbed-based embedding provider.
//!
//! This module requires the `embeddings` feature to be enabled.

#![cfg(feature = "embeddings")]

use async_trait::async_trait;
use fastembed::{EmbeddingModel as FastEmbedModel, InitOptions, TextEmbedding};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::EmbedError;
use crate::models::{EmbeddingModel, EmbeddingVector};

use super::config::EmbeddingConfig;
use super::provider::{BatchEmbeddingResult, EmbeddingProvider, EmbeddingResult};

/// FastEmbed-based embedding provider
pub struct FastEmbedProvider {
    /// The text embedding model
    model: Arc<RwLock<TextEmbedding>>,

    /// Configuration
    config: EmbeddingConfig,

    /// Cached dimension value
    dimension: usize,
}

impl FastEmbedProvider {
    /// Creates a new FastEmbed provider with the given configuration
    pub fn new(config: EmbeddingConfig) -> Result<Self, EmbedError> {
        info!(model = config.model.model_name(), "initializing FastEmbed provider");

        let fastembed_model = Self::map_model(&config.model)?;
        let dimension = config.dimension();

        let mut init_options = InitOptions::new(fastembed_model);

        if let Some(ref cache_dir) = config.cache_dir {
            init_options = init_options.with_cache_dir(cache_dir.into());
        }

        let model = TextEmbedding::try_new(init_options)
            .map_err(|e| EmbedError::Provider(format!("failed to initialize FastEmbed: {e}")))?;

        info!(dimension, "FastEmbed provider initialized");

        Ok(Self {
            model: Arc::new(RwLock::new(model)),
            config,
            dimension,
        })
    }

    /// Maps our model enum to FastEmbed's model enum
    fn map_model(model: &EmbeddingModel) -> Result<FastEmbedModel, EmbedError> {
        match model {
            EmbeddingModel::BgeSmallEnV15 => Ok(FastEmbedModel::BGESmallENV15),
            EmbeddingModel::AllMiniLmL6V2 => Ok(FastEmbedModel::AllMiniLML6V2),
            EmbeddingModel::NomicEmbedTextV15 => Ok(FastEmbedModel::NomicEmbedTextV15),
            EmbeddingModel::Custom { name, .. } => Err(EmbedError::Provider(format!(
                "custom model '{name}' not supported by FastEmbed"
            ))),
        }
    }

    /// Normalizes a vector to unit length
    fn normalize_vector(mut vector: Vec<f32>) -> Vec<f32> {
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }
        vector
    }
}

#[async_trait]
impl EmbeddingProvider for FastEmbedProvider {
    async fn embed(&self, text: &str) -> Result<EmbeddingResult, EmbedError> {
        let start = Instant::now();
        let normalize = self.config.normalize;

        debug!(chars = text.len(), "generating embedding");

        let model_lock = self.model.read().await;
        let embeddings = model_lock
            .embed(vec![text.to_string()], None)
            .map_err(|e| EmbedError::Provider(format!("inference failed: {e}")))?;

        let mut vector = embeddings
            .into_iter()
            .next()
            .ok_or_else(|| EmbedError::Provider("no embedding returned".to_string()))?;

        if normalize {
            vector = Self::normalize_vector(vector);
        }

        Ok(EmbeddingResult {
            embedding: EmbeddingVector::new(vector),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<BatchEmbeddingResult, EmbedError> {
        if texts.is_empty() {
            return Ok(BatchEmbeddingResult {
                embeddings: vec![],
                latency_ms: 0,
                count: 0,
            });
        }

        let start = Instant::now();
        let normalize = self.config.normalize;
        let batch_size = self.config.batch_size;

        debug!(count = texts.len(), batch_size, "generating batch embeddings");

        let mut all_embeddings = Vec::with_capacity(texts.len());

        for chunk in texts.chunks(batch_size) {
            let model_lock = self.model.read().await;
            let embeddings = model_lock
                .embed(chunk.to_vec(), None)
                .map_err(|e| EmbedError::Provider(format!("batch inference failed: {e}")))?;

            for mut vector in embeddings {
                if normalize {
                    vector = Self::normalize_vector(vector);
                }
                all_embeddings.push(EmbeddingVector::new(vector));
            }
        }

        let count = all_embeddings.len();

        Ok(BatchEmbeddingResult {
            embeddings: all_embeddings,
            latency_ms: start.elapsed().as_millis() as u64,
            count,
        })
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn health_check(&self) -> Result<bool, EmbedError> {
        Ok(self.embed("health check").await.is_ok())
    }

    fn provider_name(&self) -> &str {
        "fastembed"
    }
}
