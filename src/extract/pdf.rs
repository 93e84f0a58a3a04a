//! PDF page extractor.
//!
//! This module requires the `pdf` feature to be enabled.

use async_trait::async_trait;

use crate::error::ExtractError;

use super::{Page, PageExtractor};

/// Extractor for PDF documents, one page per extracted page.
pub struct PdfPageExtractor {
    /// Maximum input size to process.
    max_size: usize,
}

impl PdfPageExtractor {
    /// Creates a new PDF extractor with default settings.
    pub fn new() -> Self {
        Self {
            max_size: 100 * 1024 * 1024, // 100MB
        }
    }

    /// Sets the maximum input size.
    pub fn with_max_size(mut self, size: usize) -> Self {
        self.max_size = size;
        self
    }

    /// Collapses runs of whitespace left behind by PDF text extraction.
    fn clean_text(text: &str) -> String {
        let mut result = String::with_capacity(text.len());
        let mut prev_was_space = false;
        let mut prev_was_newline = false;

        for c in text.chars() {
            if c == '\n' {
                if !prev_was_newline {
                    result.push(c);
                    prev_was_newline = true;
                    prev_was_space = false;
                }
            } else if c.is_whitespace() {
                if !prev_was_space && !prev_was_newline {
                    result.push(' ');
                    prev_was_space = true;
                }
            } else if c.is_control() {
                continue;
            } else {
                result.push(c);
                prev_was_space = false;
                prev_was_newline = false;
            }
        }

        result.trim().to_string()
    }
}

impl Default for PdfPageExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageExtractor for PdfPageExtractor {
    async fn extract(&self, data: &[u8]) -> Result<Vec<Page>, ExtractError> {
        if data.len() > self.max_size {
            return Err(ExtractError::TooLarge {
                size: data.len(),
                max: self.max_size,
            });
        }

        if !data.starts_with(b"%PDF") {
            return Err(ExtractError::Malformed(
                "missing PDF magic bytes".to_string(),
            ));
        }

        let page_texts = pdf_extract::extract_text_from_mem_by_pages(data)
            .map_err(|e| ExtractError::Malformed(format!("PDF extraction failed: {e}")))?;

        let pages = page_texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Page::new(i as u32 + 1, Self::clean_text(&text)))
            .collect();

        Ok(pages)
    }

    fn supported_types(&self) -> Vec<&'static str> {
        vec!["application/pdf"]
    }

    fn name(&self) -> &str {
        "PdfPageExtractor"
    }
}
