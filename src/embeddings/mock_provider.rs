//! Mock embedding provider for testing.

use async_trait::async_trait;
use std::time::Instant;

use crate::error::EmbedError;
use crate::models::{EmbeddingModel, EmbeddingVector};

use super::provider::{BatchEmbeddingResult, EmbeddingProvider, EmbeddingResult};

/// Mock embedding provider for testing
///
/// Generates deterministic embeddings based on text hash for reproducible
/// tests.
pub struct MockEmbeddingProvider {
    dimension: usize,
    latency_ms: u64,
    should_fail: bool,
}

impl MockEmbeddingProvider {
    /// Creates a new mock provider with the model's dimension
    pub fn new(model: EmbeddingModel) -> Self {
        let dimension = model.dimension();
        Self {
            dimension: if dimension == 0 { 384 } else { dimension },
            latency_ms: 0,
            should_fail: false,
        }
    }

    /// Sets a custom dimension (useful to simulate a misbehaving backend)
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    /// Sets the simulated latency
    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Makes the provider fail on all operations
    pub fn should_fail(mut self, fail: bool) -> Self {
        self.should_fail = fail;
        self
    }

    /// Generates a deterministic normalized embedding based on text hash
    fn generate_embedding(&self, text: &str) -> Vec<f32> {
        let hash = Self::simple_hash(text);
        let mut vector = Vec::with_capacity(self.dimension);

        for i in 0..self.dimension {
            let value = ((hash.wrapping_add(i as u64).wrapping_mul(2654435761)) % 10000) as f32
                / 10000.0
                - 0.5;
            vector.push(value);
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }

        vector
    }

    /// djb2 hash, good enough for deterministic test vectors
    fn simple_hash(text: &str) -> u64 {
        let mut hash: u64 = 5381;
        for byte in text.bytes() {
            hash = hash.wrapping_mul(33).wrapping_add(byte as u64);
        }
        hash
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<EmbeddingResult, EmbedError> {
        if self.should_fail {
            return Err(EmbedError::Provider(
                "mock provider configured to fail".to_string(),
            ));
        }

        let start = Instant::now();

        if self.latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.latency_ms)).await;
        }

        let vector = self.generate_embedding(text);

        Ok(EmbeddingResult {
            embedding: EmbeddingVector::new(vector),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<BatchEmbeddingResult, EmbedError> {
        if self.should_fail {
            return Err(EmbedError::Provider(
                "mock provider configured to fail".to_string(),
            ));
        }

        let start = Instant::now();

        if self.latency_ms > 0 {
            let total_latency = self.latency_ms * (texts.len() as u64).min(10);
            tokio::time::sleep(tokio::time::Duration::from_millis(total_latency)).await;
        }

        let embeddings: Vec<EmbeddingVector> = texts
            .iter()
            .map(|text| EmbeddingVector::new(self.generate_embedding(text)))
            .collect();

        let count = embeddings.len();

        Ok(BatchEmbeddingResult {
            embeddings,
            latency_ms: start.elapsed().as_millis() as u64,
            count,
        })
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn health_check(&self) -> Result<bool, EmbedError> {
        Ok(!self.should_fail)
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
