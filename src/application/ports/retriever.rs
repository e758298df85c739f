use async_trait::async_trait;

use crate::domain::Chunk;

/// Produces the most relevant stored chunks for a query string.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve(&self, query: &str, top_k: usize)
        -> Result<Vec<ScoredChunk>, RetrieverError>;
}

#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
}

#[derive(Debug, thiserror::Error)]
pub enum RetrieverError {
    #[error("query embedding failed: {0}")]
    EmbeddingFailed(String),
    #[error("search failed: {0}")]
    SearchFailed(String),
}
