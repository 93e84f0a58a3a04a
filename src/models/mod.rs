//! Domain model for manualdex.

pub mod document;
pub mod embedding;
pub mod fragment;

pub use document::{DeviceId, Document, DocumentDraft, DocumentId, ValidationError};
pub use embedding::{EmbeddingModel, EmbeddingVector};
pub use fragment::{Fragment, FragmentId};
