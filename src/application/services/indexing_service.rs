use std::sync::Arc;

use crate::application::ports::{
    DocumentSource, Embedder, EmbedderError, PdfSourceError, RepositoryError, StudyRepository,
    TextSplitter, TextSplitterError, VectorIndex, VectorIndexError,
};
use crate::domain::Document;

/// Builds the knowledge base for a document: full text -> overlapping chunks
/// -> embeddings -> persisted index. Triggered by an explicit user action,
/// runs to completion before returning.
pub struct IndexingService<S, V, T: ?Sized>
where
    S: DocumentSource,
    V: VectorIndex,
    T: TextSplitter,
{
    source: Arc<S>,
    splitter: Arc<T>,
    embedder: Arc<dyn Embedder>,
    index: Arc<V>,
    repository: Arc<dyn StudyRepository>,
}

impl<S, V, T: ?Sized> IndexingService<S, V, T>
where
    S: DocumentSource,
    V: VectorIndex,
    T: TextSplitter,
{
    pub fn new(
        source: Arc<S>,
        splitter: Arc<T>,
        embedder: Arc<dyn Embedder>,
        index: Arc<V>,
        repository: Arc<dyn StudyRepository>,
    ) -> Self {
        Self {
            source,
            splitter,
            embedder,
            index,
            repository,
        }
    }

    /// Returns the number of chunks appended. The document's processed flag
    /// flips only after the index write succeeds; any earlier failure leaves
    /// it untouched.
    #[tracing::instrument(skip(self, document), fields(document_id = %document.id.as_uuid()))]
    pub async fn build_knowledge_base(&self, document: &Document) -> Result<usize, IndexingError> {
        let text = self
            .source
            .load_full_text(&document.path)
            .await
            .map_err(IndexingError::Loading)?;

        let chunks = self
            .splitter
            .split(&text, document.id)
            .await
            .map_err(IndexingError::Splitting)?;

        if chunks.is_empty() {
            return Ok(0);
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self
            .embedder
            .embed_batch(&texts)
            .await
            .map_err(IndexingError::Embedding)?;

        self.index
            .append(&chunks, &embeddings)
            .await
            .map_err(IndexingError::Index)?;

        self.repository.mark_processed(document.id).await?;

        tracing::info!(chunk_count = chunks.len(), "Knowledge base built");

        Ok(chunks.len())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IndexingError {
    #[error("loading: {0}")]
    Loading(PdfSourceError),
    #[error("splitting: {0}")]
    Splitting(TextSplitterError),
    #[error("embedding: {0}")]
    Embedding(EmbedderError),
    #[error("index: {0}")]
    Index(VectorIndexError),
    #[error("persistence: {0}")]
    Repository(#[from] RepositoryError),
}
