//! Plain text and Markdown page extractor.

use async_trait::async_trait;

use crate::error::ExtractError;

use super::{Page, PageExtractor};

/// Form feed, the conventional page separator in plain text documents.
const PAGE_SEPARATOR: char = '\u{0C}';

/// Extractor for plain text and Markdown documents.
///
/// Form feed characters split the input into pages; a document without any
/// acts as a single page. A leading Markdown heading on a page becomes its
/// section title.
pub struct TextPageExtractor {
    /// Maximum input size to process.
    max_size: usize,
    /// Normalize CRLF/CR line endings to LF.
    normalize_line_endings: bool,
}

impl TextPageExtractor {
    /// Creates a new text extractor with default settings.
    pub fn new() -> Self {
        Self {
            max_size: 50 * 1024 * 1024, // 50MB
            normalize_line_endings: true,
        }
    }

    /// Sets the maximum input size.
    pub fn with_max_size(mut self, size: usize) -> Self {
        self.max_size = size;
        self
    }

    /// Sets whether to normalize line endings.
    pub fn with_normalize_line_endings(mut self, normalize: bool) -> Self {
        self.normalize_line_endings = normalize;
        self
    }

    /// Decodes the input as UTF-8, stripping a BOM if present.
    fn decode(&self, data: &[u8]) -> Result<String, ExtractError> {
        let start = if data.starts_with(&[0xEF, 0xBB, 0xBF]) {
            3
        } else {
            0
        };

        let text = std::str::from_utf8(&data[start..])
            .map_err(|e| ExtractError::Malformed(format!("invalid UTF-8: {e}")))?;

        Ok(text.to_string())
    }

    /// Normalizes line endings to Unix style.
    fn normalize_endings(&self, text: &str) -> String {
        text.replace("\r\n", "\n").replace('\r', "\n")
    }

    /// Detects a section title from a page's leading Markdown heading.
    fn detect_section_title(text: &str) -> Option<String> {
        let first_line = text.lines().find(|line| !line.trim().is_empty())?;
        let trimmed = first_line.trim();

        let title = trimmed.trim_start_matches('#');
        if title.len() == trimmed.len() {
            return None;
        }

        let title = title.trim();
        if title.is_empty() {
            None
        } else {
            Some(title.to_string())
        }
    }
}

impl Default for TextPageExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageExtractor for TextPageExtractor {
    async fn extract(&self, data: &[u8]) -> Result<Vec<Page>, ExtractError> {
        if data.len() > self.max_size {
            return Err(ExtractError::TooLarge {
                size: data.len(),
                max: self.max_size,
            });
        }

        let mut text = self.decode(data)?;
        if self.normalize_line_endings {
            text = self.normalize_endings(&text);
        }

        let pages = text
            .split(PAGE_SEPARATOR)
            .enumerate()
            .map(|(i, page_text)| {
                let mut page = Page::new(i as u32 + 1, page_text.trim_matches('\n'));
                if let Some(title) = Self::detect_section_title(&page.text) {
                    page = page.with_section_title(title);
                }
                page
            })
            .collect();

        Ok(pages)
    }

    fn supported_types(&self) -> Vec<&'static str> {
        vec!["text/plain", "text/markdown"]
    }

    fn name(&self) -> &str {
        "TextPageExtractor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_single_page_without_separator() {
        let extractor = TextPageExtractor::new();
        let pages = extractor.extract(b"Just one page of text.").await.unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].number, 1);
        assert_eq!(pages[0].text, "Just one page of text.");
    }

    #[tokio::test]
    async fn test_form_feed_splits_pages_in_order() {
        let extractor = TextPageExtractor::new();
        let pages = extractor
            .extract("page one\u{0C}page two\u{0C}page three".as_bytes())
            .await
            .unwrap();

        assert_eq!(pages.len(), 3);
        assert_eq!(
            pages.iter().map(|p| p.number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(pages[2].text, "page three");
    }

    #[tokio::test]
    async fn test_blank_page_is_yielded() {
        let extractor = TextPageExtractor::new();
        let pages = extractor
            .extract("first\u{0C}   \n \u{0C}third".as_bytes())
            .await
            .unwrap();

        assert_eq!(pages.len(), 3);
        assert!(pages[1].is_blank());
        assert!(!pages[0].is_blank());
        assert!(!pages[2].is_blank());
    }

    #[tokio::test]
    async fn test_markdown_heading_becomes_section_title() {
        let extractor = TextPageExtractor::new();
        let pages = extractor
            .extract("# Safety instructions\nUnplug before cleaning.".as_bytes())
            .await
            .unwrap();

        assert_eq!(
            pages[0].section_title.as_deref(),
            Some("Safety instructions")
        );
    }

    #[tokio::test]
    async fn test_plain_first_line_is_not_a_title() {
        let extractor = TextPageExtractor::new();
        let pages = extractor.extract(b"No heading here.\nBody.").await.unwrap();

        assert!(pages[0].section_title.is_none());
    }

    #[tokio::test]
    async fn test_bom_is_stripped() {
        let extractor = TextPageExtractor::new();
        let mut data = vec![0xEF, 0xBB, 0xBF];
        data.extend_from_slice(b"content");

        let pages = extractor.extract(&data).await.unwrap();
        assert_eq!(pages[0].text, "content");
    }

    #[tokio::test]
    async fn test_crlf_normalized() {
        let extractor = TextPageExtractor::new();
        let pages = extractor.extract(b"line one\r\nline two").await.unwrap();

        assert_eq!(pages[0].text, "line one\nline two");
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_malformed() {
        let extractor = TextPageExtractor::new();
        let result = extractor.extract(&[0xC3, 0x28, 0xA0, 0xA1]).await;

        assert!(matches!(result, Err(ExtractError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_oversized_input_rejected() {
        let extractor = TextPageExtractor::new().with_max_size(8);
        let result = extractor.extract(b"way too much input").await;

        assert!(matches!(result, Err(ExtractError::TooLarge { .. })));
    }

    #[test]
    fn test_supported_types() {
        let extractor = TextPageExtractor::new();
        assert!(extractor.supports("text/plain"));
        assert!(extractor.supports("text/markdown"));
        assert!(!extractor.supports("application/pdf"));
        assert_eq!(extractor.name(), "TextPageExtractor");
    }
}
