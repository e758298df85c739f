use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;

use crate::application::ports::{DocumentSource, PdfSourceError};
use crate::domain::Heading;

/// In-memory `DocumentSource` for tests: fixed headings and per-page text,
/// 1-indexed like the real adapter.
#[derive(Default)]
pub struct MockDocumentSource {
    headings: Vec<Heading>,
    pages: BTreeMap<u32, String>,
}

impl MockDocumentSource {
    pub fn new(headings: Vec<Heading>, pages: BTreeMap<u32, String>) -> Self {
        Self { headings, pages }
    }

    pub fn with_pages(pages: BTreeMap<u32, String>) -> Self {
        Self {
            headings: Vec::new(),
            pages,
        }
    }
}

#[async_trait]
impl DocumentSource for MockDocumentSource {
    async fn read_outline(&self, _path: &Path) -> Result<Vec<Heading>, PdfSourceError> {
        Ok(self.headings.clone())
    }

    async fn extract_page_range(
        &self,
        _path: &Path,
        start: u32,
        end: u32,
    ) -> Result<String, PdfSourceError> {
        let text = (start..=end)
            .filter_map(|page| self.pages.get(&page))
            .cloned()
            .collect::<Vec<_>>()
            .join("\n");
        Ok(text)
    }

    async fn load_full_text(&self, _path: &Path) -> Result<String, PdfSourceError> {
        Ok(self
            .pages
            .values()
            .cloned()
            .collect::<Vec<_>>()
            .join("\n\n"))
    }
}
