//! Embedding vectors and the models that produce them.

use serde::{Deserialize, Serialize};

/// Supported embedding models
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum EmbeddingModel {
    /// BAAI BGE Small EN v1.5 (384 dimensions)
    BgeSmallEnV15,
    /// Sentence Transformers all-MiniLM-L6-v2 (384 dimensions)
    AllMiniLmL6V2,
    /// Nomic Embed Text v1.5 (768 dimensions)
    NomicEmbedTextV15,
    /// Custom model with an explicit dimension
    Custom { name: String, dimension: usize },
}

impl EmbeddingModel {
    /// Returns the expected vector dimension
    pub fn dimension(&self) -> usize {
        match self {
            EmbeddingModel::BgeSmallEnV15 => 384,
            EmbeddingModel::AllMiniLmL6V2 => 384,
            EmbeddingModel::NomicEmbedTextV15 => 768,
            EmbeddingModel::Custom { dimension, .. } => *dimension,
        }
    }

    /// Returns the canonical model name
    pub fn model_name(&self) -> &str {
        match self {
            EmbeddingModel::BgeSmallEnV15 => "BAAI/bge-small-en-v1.5",
            EmbeddingModel::AllMiniLmL6V2 => "sentence-transformers/all-MiniLM-L6-v2",
            EmbeddingModel::NomicEmbedTextV15 => "nomic-ai/nomic-embed-text-v1.5",
            EmbeddingModel::Custom { name, .. } => name,
        }
    }
}

impl Default for EmbeddingModel {
    fn default() -> Self {
        EmbeddingModel::BgeSmallEnV15
    }
}

/// A fixed-dimension embedding vector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingVector {
    /// Vector components
    pub vector: Vec<f32>,

    /// Dimension of the vector
    pub dimension: usize,
}

impl EmbeddingVector {
    /// Creates a new embedding vector
    pub fn new(vector: Vec<f32>) -> Self {
        let dimension = vector.len();
        Self { vector, dimension }
    }

    /// Creates a zero vector of the given dimension
    pub fn zeros(dimension: usize) -> Self {
        Self {
            vector: vec![0.0; dimension],
            dimension,
        }
    }

    /// Computes cosine similarity with another vector.
    ///
    /// Returns 0.0 (not an error, not NaN) when either vector has zero
    /// magnitude or the dimensions differ.
    pub fn cosine_similarity(&self, other: &EmbeddingVector) -> f32 {
        if self.dimension != other.dimension {
            return 0.0;
        }

        let dot_product: f32 = self
            .vector
            .iter()
            .zip(other.vector.iter())
            .map(|(a, b)| a * b)
            .sum();

        let norm_a = self.magnitude();
        let norm_b = other.magnitude();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        dot_product / (norm_a * norm_b)
    }

    /// Returns the Euclidean magnitude of the vector
    pub fn magnitude(&self) -> f32 {
        self.vector.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    /// Normalizes the vector to unit length (zero vectors stay zero)
    pub fn normalize(&mut self) {
        let norm = self.magnitude();
        if norm > 0.0 {
            for value in &mut self.vector {
                *value /= norm;
            }
        }
    }

    /// Checks whether the vector has unit length
    pub fn is_normalized(&self) -> bool {
        (self.magnitude() - 1.0).abs() < 1e-6
    }
}
