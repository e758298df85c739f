use std::path::Path;

use async_trait::async_trait;

use crate::domain::Heading;

/// Read-only access to an uploaded document's file.
///
/// `read_outline` returns an empty sequence, not an error, when the source
/// carries no embedded outline; callers treat empty as "cannot segment".
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn read_outline(&self, path: &Path) -> Result<Vec<Heading>, PdfSourceError>;

    /// Concatenated text of pages `start..=end` (1-indexed). Pages past the
    /// document's last page are skipped without error.
    async fn extract_page_range(
        &self,
        path: &Path,
        start: u32,
        end: u32,
    ) -> Result<String, PdfSourceError>;

    /// Layout-aware extraction of the whole document, for chunking.
    async fn load_full_text(&self, path: &Path) -> Result<String, PdfSourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PdfSourceError {
    #[error("failed to parse PDF: {0}")]
    ParseFailed(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("no text found in {0}")]
    NoTextFound(String),
}
