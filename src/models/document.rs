//! Documents (uploaded manuals) and their metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum title length in characters.
pub const TITLE_MAX_LEN: usize = 200;
/// Maximum brand length in characters.
pub const BRAND_MAX_LEN: usize = 100;
/// Maximum model number length in characters.
pub const MODEL_NUMBER_MAX_LEN: usize = 50;

/// Identity of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Identity of a device a manual may be linked to.
///
/// The core only ever carries this id around; device fields live in the
/// surrounding CRUD layer and are never dereferenced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(Uuid);

impl DeviceId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DeviceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// An uploaded manual.
///
/// Created on upload; only the ingestion orchestrator mutates it afterwards,
/// to record the content-derived reference once ingestion completes. The
/// search path never touches it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document identity.
    pub id: DocumentId,

    /// Manual title.
    pub title: String,

    /// Device brand.
    pub brand: String,

    /// Device model number.
    pub model_number: String,

    /// Original file name of the upload.
    pub file_name: String,

    /// Content type of the upload (e.g. "application/pdf").
    pub content_type: String,

    /// File size in bytes.
    pub file_size: u64,

    /// Upload timestamp.
    pub uploaded_at: DateTime<Utc>,

    /// Device this manual belongs to, if any.
    pub device_id: Option<DeviceId>,

    /// Content-derived reference, recorded when ingestion completes.
    pub content_ref: Option<String>,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Field the failure applies to.
    pub field: &'static str,

    /// Human-readable message.
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Builder for a [`Document`], validated before construction.
///
/// Validation failures are returned as a structured list, never raised.
#[derive(Debug, Clone)]
pub struct DocumentDraft {
    title: String,
    brand: String,
    model_number: String,
    file_name: String,
    content_type: String,
    file_size: u64,
    device_id: Option<DeviceId>,
}

impl DocumentDraft {
    /// Creates a new draft from upload metadata.
    pub fn new(title: &str, file_name: &str, content_type: &str, file_size: u64) -> Self {
        Self {
            title: title.to_string(),
            brand: String::new(),
            model_number: String::new(),
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            file_size,
            device_id: None,
        }
    }

    /// Sets the device brand.
    pub fn with_brand(mut self, brand: &str) -> Self {
        self.brand = brand.to_string();
        self
    }

    /// Sets the device model number.
    pub fn with_model_number(mut self, model_number: &str) -> Self {
        self.model_number = model_number.to_string();
        self
    }

    /// Links the manual to a device.
    pub fn with_device(mut self, device_id: DeviceId) -> Self {
        self.device_id = Some(device_id);
        self
    }

    /// Validates the draft, collecting every failure.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push(ValidationError::new("title", "title is required"));
        } else if self.title.chars().count() > TITLE_MAX_LEN {
            errors.push(ValidationError::new(
                "title",
                format!("title must be at most {TITLE_MAX_LEN} characters"),
            ));
        }

        if self.brand.trim().is_empty() {
            errors.push(ValidationError::new("brand", "brand is required"));
        } else if self.brand.chars().count() > BRAND_MAX_LEN {
            errors.push(ValidationError::new(
                "brand",
                format!("brand must be at most {BRAND_MAX_LEN} characters"),
            ));
        }

        if self.model_number.trim().is_empty() {
            errors.push(ValidationError::new(
                "model_number",
                "model number is required",
            ));
        } else if self.model_number.chars().count() > MODEL_NUMBER_MAX_LEN {
            errors.push(ValidationError::new(
                "model_number",
                format!("model number must be at most {MODEL_NUMBER_MAX_LEN} characters"),
            ));
        }

        if self.file_name.trim().is_empty() {
            errors.push(ValidationError::new("file_name", "file name is required"));
        }

        if self.content_type.trim().is_empty() {
            errors.push(ValidationError::new(
                "content_type",
                "content type is required",
            ));
        }

        errors
    }

    /// Validates and builds the document.
    pub fn build(self) -> Result<Document, Vec<ValidationError>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Document {
            id: DocumentId::new(),
            title: self.title,
            brand: self.brand,
            model_number: self.model_number,
            file_name: self.file_name,
            content_type: self.content_type,
            file_size: self.file_size,
            uploaded_at: Utc::now(),
            device_id: self.device_id,
            content_ref: None,
        })
    }
}
