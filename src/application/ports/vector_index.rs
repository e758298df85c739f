use async_trait::async_trait;

use super::Retriever;
use crate::domain::{Chunk, Embedding};

/// A persistent similarity index over chunks.
///
/// `append` accumulates: repeated builds over the same document add records
/// rather than replacing them. `retriever` signals an absent index with
/// `Ok(None)` so callers can degrade without treating absence as a failure.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    async fn append(
        &self,
        chunks: &[Chunk],
        embeddings: &[Embedding],
    ) -> Result<(), VectorIndexError>;

    async fn retriever(&self) -> Result<Option<Box<dyn Retriever>>, VectorIndexError>;
}

#[derive(Debug, thiserror::Error)]
pub enum VectorIndexError {
    #[error("index write failed: {0}")]
    WriteFailed(String),
    #[error("index read failed: {0}")]
    ReadFailed(String),
    #[error("chunk/embedding count mismatch: {chunks} chunks, {embeddings} embeddings")]
    CountMismatch { chunks: usize, embeddings: usize },
}
