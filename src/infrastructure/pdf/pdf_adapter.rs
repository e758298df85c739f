use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use lopdf::Document;

use crate::application::ports::{DocumentSource, PdfSourceError};
use crate::domain::Heading;

use super::outline::read_outline;
use crate::infrastructure::text_processing::sanitize_extracted_text;

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// PDF-backed `DocumentSource`.
///
/// Outline and page-range reads go through lopdf; whole-document text for
/// chunking uses pdf-extract, which preserves reading layout better. All
/// parsing runs on the blocking pool under a timeout.
#[derive(Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }

    fn open(path: &Path) -> Result<Document, PdfSourceError> {
        Document::load(path)
            .map_err(|e| PdfSourceError::ParseFailed(format!("failed to parse PDF: {e}")))
    }

    fn extract_range_blocking(
        path: &Path,
        start: u32,
        end: u32,
    ) -> Result<String, PdfSourceError> {
        let doc = Self::open(path)?;
        let last_page = doc.get_pages().len() as u32;

        let mut pages = Vec::new();
        for page in start..=end.min(last_page) {
            // a page that fails to extract degrades to empty, not an error
            let text = doc.extract_text(&[page]).unwrap_or_default();
            let sanitized = sanitize_extracted_text(&text);
            if !sanitized.is_empty() {
                pages.push(sanitized);
            }
        }

        Ok(pages.join("\n\n"))
    }

    async fn run_blocking<T, F>(task: F) -> Result<T, PdfSourceError>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, PdfSourceError> + Send + 'static,
    {
        tokio::time::timeout(EXTRACTION_TIMEOUT, tokio::task::spawn_blocking(task))
            .await
            .map_err(|_| PdfSourceError::ExtractionFailed("PDF extraction timed out".to_string()))?
            .map_err(|e| PdfSourceError::ExtractionFailed(format!("task join error: {e}")))?
    }
}

#[async_trait]
impl DocumentSource for PdfAdapter {
    #[tracing::instrument(skip(self))]
    async fn read_outline(&self, path: &Path) -> Result<Vec<Heading>, PdfSourceError> {
        let path = path.to_path_buf();

        let headings = Self::run_blocking(move || {
            let doc = Self::open(&path)?;
            Ok(read_outline(&doc))
        })
        .await?;

        tracing::info!(heading_count = headings.len(), "Outline read");

        Ok(headings)
    }

    #[tracing::instrument(skip(self))]
    async fn extract_page_range(
        &self,
        path: &Path,
        start: u32,
        end: u32,
    ) -> Result<String, PdfSourceError> {
        let path = path.to_path_buf();

        Self::run_blocking(move || Self::extract_range_blocking(&path, start, end)).await
    }

    #[tracing::instrument(skip(self))]
    async fn load_full_text(&self, path: &Path) -> Result<String, PdfSourceError> {
        let path = path.to_path_buf();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let text = Self::run_blocking(move || {
            pdf_extract::extract_text(&path)
                .map_err(|e| PdfSourceError::ExtractionFailed(format!("layout extraction: {e}")))
        })
        .await?;

        let sanitized = sanitize_extracted_text(&text);
        if sanitized.is_empty() {
            return Err(PdfSourceError::NoTextFound(filename));
        }

        tracing::info!(chars = sanitized.len(), "Full document text extracted");

        Ok(sanitized)
    }
}
