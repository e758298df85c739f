use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::application::ports::{
    Embedder, Retriever, RetrieverError, ScoredChunk, VectorIndex, VectorIndexError,
};
use crate::domain::{Chunk, ChunkId, DocumentId, Embedding};

/// Candidate pool size before diversity re-ranking.
const DEFAULT_FETCH_K: usize = 20;
/// Relevance/diversity trade-off for maximal-marginal-relevance.
const DEFAULT_MMR_LAMBDA: f32 = 0.5;

/// File-backed similarity index: one JSON-lines file per collection under a
/// storage root. Appends accumulate; rebuilding a knowledge base adds records
/// rather than replacing earlier ones. Concurrent appends to the same
/// collection are unguarded.
pub struct DiskVectorIndex {
    path: PathBuf,
    embedder: Arc<dyn Embedder>,
    fetch_k: usize,
    mmr_lambda: f32,
}

#[derive(Serialize, Deserialize)]
struct StoredChunk {
    id: Uuid,
    document_id: Uuid,
    page: Option<u32>,
    offset: usize,
    text: String,
    embedding: Vec<f32>,
}

impl DiskVectorIndex {
    pub fn new(root: impl Into<PathBuf>, collection: &str, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            path: root.into().join(format!("{collection}.jsonl")),
            embedder,
            fetch_k: DEFAULT_FETCH_K,
            mmr_lambda: DEFAULT_MMR_LAMBDA,
        }
    }
}

#[async_trait]
impl VectorIndex for DiskVectorIndex {
    #[tracing::instrument(skip(self, chunks, embeddings), fields(path = %self.path.display()))]
    async fn append(
        &self,
        chunks: &[Chunk],
        embeddings: &[Embedding],
    ) -> Result<(), VectorIndexError> {
        if chunks.len() != embeddings.len() {
            return Err(VectorIndexError::CountMismatch {
                chunks: chunks.len(),
                embeddings: embeddings.len(),
            });
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| VectorIndexError::WriteFailed(e.to_string()))?;
        }

        let mut lines = String::new();
        for (chunk, embedding) in chunks.iter().zip(embeddings.iter()) {
            let record = StoredChunk {
                id: chunk.id.as_uuid(),
                document_id: chunk.document_id.as_uuid(),
                page: chunk.page,
                offset: chunk.offset,
                text: chunk.text.clone(),
                embedding: embedding.values.clone(),
            };
            let line = serde_json::to_string(&record)
                .map_err(|e| VectorIndexError::WriteFailed(e.to_string()))?;
            lines.push_str(&line);
            lines.push('\n');
        }

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| VectorIndexError::WriteFailed(e.to_string()))?;
        file.write_all(lines.as_bytes())
            .await
            .map_err(|e| VectorIndexError::WriteFailed(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| VectorIndexError::WriteFailed(e.to_string()))?;

        tracing::info!(appended = chunks.len(), "Chunks appended to index");

        Ok(())
    }

    async fn retriever(&self) -> Result<Option<Box<dyn Retriever>>, VectorIndexError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(VectorIndexError::ReadFailed(e.to_string())),
        };

        let mut records = Vec::new();
        for line in contents.lines().filter(|l| !l.trim().is_empty()) {
            let stored: StoredChunk = serde_json::from_str(line)
                .map_err(|e| VectorIndexError::ReadFailed(e.to_string()))?;
            let mut chunk = Chunk::new(
                stored.text,
                DocumentId::from_uuid(stored.document_id),
                stored.page,
                stored.offset,
            );
            chunk.id = ChunkId::from_uuid(stored.id);
            records.push((chunk, Embedding::new(stored.embedding)));
        }

        if records.is_empty() {
            return Ok(None);
        }

        Ok(Some(Box::new(MmrRetriever {
            records,
            embedder: Arc::clone(&self.embedder),
            fetch_k: self.fetch_k,
            lambda: self.mmr_lambda,
        })))
    }
}

/// Similarity search with maximal-marginal-relevance re-ranking: candidates
/// are the `fetch_k` nearest by cosine, selection then trades relevance
/// against redundancy with already-selected chunks.
struct MmrRetriever {
    records: Vec<(Chunk, Embedding)>,
    embedder: Arc<dyn Embedder>,
    fetch_k: usize,
    lambda: f32,
}

#[async_trait]
impl Retriever for MmrRetriever {
    async fn retrieve(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<ScoredChunk>, RetrieverError> {
        let query_embedding = self
            .embedder
            .embed(query)
            .await
            .map_err(|e| RetrieverError::EmbeddingFailed(e.to_string()))?;

        let mut ranked: Vec<(usize, f32)> = self
            .records
            .iter()
            .enumerate()
            .map(|(i, (_, embedding))| (i, query_embedding.cosine_similarity(embedding)))
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        ranked.truncate(self.fetch_k);

        let mut selected: Vec<(usize, f32)> = Vec::new();
        let mut taken: HashSet<usize> = HashSet::new();

        while selected.len() < top_k && taken.len() < ranked.len() {
            let mut best: Option<(usize, f32, f32)> = None;

            for &(idx, relevance) in ranked.iter().filter(|(idx, _)| !taken.contains(idx)) {
                let redundancy = selected
                    .iter()
                    .map(|&(sel_idx, _)| {
                        self.records[idx].1.cosine_similarity(&self.records[sel_idx].1)
                    })
                    .fold(0.0f32, f32::max);

                let score = self.lambda * relevance - (1.0 - self.lambda) * redundancy;

                if best.map_or(true, |(_, _, best_score)| score > best_score) {
                    best = Some((idx, relevance, score));
                }
            }

            match best {
                Some((idx, relevance, _)) => {
                    taken.insert(idx);
                    selected.push((idx, relevance));
                }
                None => break,
            }
        }

        Ok(selected
            .into_iter()
            .map(|(idx, score)| ScoredChunk {
                chunk: self.records[idx].0.clone(),
                score,
            })
            .collect())
    }
}
