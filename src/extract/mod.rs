//! Page-level text extraction from uploaded documents.
//!
//! Extractors turn a raw byte stream into an ordered sequence of pages:
//! - Plain text and Markdown (form feed as page separator)
//! - PDF documents (requires the `pdf` feature)
//!
//! Pages are produced strictly in physical order starting at 1. Blank pages
//! are yielded as-is; callers filter them out before indexing.

pub mod text;

#[cfg(feature = "pdf")]
pub mod pdf;

use async_trait::async_trait;

use crate::error::ExtractError;

/// One extracted page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based page number.
    pub number: u32,

    /// Extracted text, possibly empty.
    pub text: String,

    /// Section title detected on this page, if any.
    pub section_title: Option<String>,
}

impl Page {
    /// Creates a new page.
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
            section_title: None,
        }
    }

    /// Sets the section title.
    pub fn with_section_title(mut self, title: impl Into<String>) -> Self {
        self.section_title = Some(title.into());
        self
    }

    /// Checks whether the page has no indexable text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Trait for page extractors.
#[async_trait]
pub trait PageExtractor: Send + Sync {
    /// Extracts pages from document bytes, in physical order.
    ///
    /// Extraction reads the input and nothing else; a malformed document
    /// fails the whole call rather than yielding a partial page set.
    async fn extract(&self, data: &[u8]) -> Result<Vec<Page>, ExtractError>;

    /// Returns the MIME types this extractor handles.
    fn supported_types(&self) -> Vec<&'static str>;

    /// Checks if this extractor handles a given content type.
    fn supports(&self, content_type: &str) -> bool {
        self.supported_types().contains(&content_type)
    }

    /// Returns the extractor name.
    fn name(&self) -> &str;
}

/// Factory for creating extractors by content type.
pub struct ExtractorFactory;

impl ExtractorFactory {
    /// Creates an extractor for the given content type.
    pub fn for_content_type(content_type: &str) -> Result<Box<dyn PageExtractor>, ExtractError> {
        match content_type {
            "text/plain" | "text/markdown" => Ok(Self::text()),
            #[cfg(feature = "pdf")]
            "application/pdf" => Ok(Self::pdf()),
            other => Err(ExtractError::UnsupportedType(other.to_string())),
        }
    }

    /// Creates a plain text extractor.
    pub fn text() -> Box<dyn PageExtractor> {
        Box::new(text::TextPageExtractor::new())
    }

    /// Creates a PDF extractor (if feature enabled).
    #[cfg(feature = "pdf")]
    pub fn pdf() -> Box<dyn PageExtractor> {
        Box::new(pdf::PdfPageExtractor::new())
    }
}

// Re-exports
pub use text::TextPageExtractor;

#[cfg(feature = "pdf")]
pub use pdf::PdfPageExtractor;
