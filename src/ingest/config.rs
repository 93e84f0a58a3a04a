//! Ingestion service configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the ingestion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionConfig {
    /// Maximum upload size in bytes (default: 10MB).
    pub max_file_size: usize,

    /// Content types accepted for ingestion.
    pub allowed_content_types: Vec<String>,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024, // 10MB
            allowed_content_types: vec![
                "application/pdf".to_string(),
                "text/plain".to_string(),
                "text/markdown".to_string(),
            ],
        }
    }
}

impl IngestionConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set maximum upload size.
    pub fn with_max_file_size(mut self, size: usize) -> Self {
        self.max_file_size = size;
        self
    }

    /// Builder: set accepted content types.
    pub fn with_allowed_content_types(mut self, types: Vec<String>) -> Self {
        self.allowed_content_types = types;
        self
    }

    /// Creates configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("INGESTION_MAX_FILE_SIZE") {
            if let Ok(size) = val.parse::<usize>() {
                config.max_file_size = size;
            }
        }

        if let Ok(val) = std::env::var("INGESTION_ALLOWED_TYPES") {
            config.allowed_content_types = val
                .split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
        }

        config
    }

    /// Checks if a content type is accepted.
    pub fn is_content_type_allowed(&self, content_type: &str) -> bool {
        self.allowed_content_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(content_type))
    }

    /// Checks if an upload size is within limits.
    pub fn is_size_allowed(&self, size: usize) -> bool {
        size <= self.max_file_size
    }
}
