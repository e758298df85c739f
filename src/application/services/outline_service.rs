use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{DocumentSource, PdfSourceError};
use crate::domain::{topics_from_headings, Heading, Topic};

/// Segments a document into study topics from its embedded outline.
pub struct OutlineService<S>
where
    S: DocumentSource,
{
    source: Arc<S>,
}

impl<S> OutlineService<S>
where
    S: DocumentSource,
{
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    pub async fn headings(&self, path: &Path) -> Result<Vec<Heading>, OutlineError> {
        Ok(self.source.read_outline(path).await?)
    }

    /// Empty when the document has no outline; callers surface that to the
    /// user as "cannot segment" rather than failing.
    pub async fn topics(&self, path: &Path) -> Result<Vec<Topic>, OutlineError> {
        let headings = self.source.read_outline(path).await?;
        Ok(topics_from_headings(&headings))
    }

    pub async fn topic_text(&self, path: &Path, topic: &Topic) -> Result<String, OutlineError> {
        let text = self
            .source
            .extract_page_range(path, topic.start_page, topic.end_page)
            .await?;
        Ok(text)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OutlineError {
    #[error("document source: {0}")]
    Source(#[from] PdfSourceError),
}
