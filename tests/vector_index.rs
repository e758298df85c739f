use std::sync::Arc;

use studykit::application::ports::{Embedder, VectorIndex, VectorIndexError};
use studykit::domain::{Chunk, DocumentId};
use studykit::infrastructure::index::DiskVectorIndex;
use studykit::infrastructure::llm::HashEmbedder;

fn chunk(text: &str, doc_id: DocumentId, offset: usize) -> Chunk {
    Chunk::new(text.to_string(), doc_id, None, offset)
}

async fn embed_all(embedder: &HashEmbedder, chunks: &[Chunk]) -> Vec<studykit::domain::Embedding> {
    let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
    embedder.embed_batch(&texts).await.unwrap()
}

#[tokio::test]
async fn given_no_index_on_disk_when_opening_retriever_then_absent_not_error() {
    let dir = tempfile::tempdir().unwrap();
    let index = DiskVectorIndex::new(dir.path(), "chunks", Arc::new(HashEmbedder::default()));

    let retriever = index.retriever().await.unwrap();

    assert!(retriever.is_none());
}

#[tokio::test]
async fn given_appended_chunks_when_retrieving_then_vocabulary_match_ranks_first() {
    let dir = tempfile::tempdir().unwrap();
    let embedder = Arc::new(HashEmbedder::new(256));
    let index = DiskVectorIndex::new(dir.path(), "chunks", embedder.clone());
    let doc_id = DocumentId::new();

    let chunks = vec![
        chunk("osmosis moves water across a membrane", doc_id, 0),
        chunk("volcanoes erupt molten basalt rock", doc_id, 100),
        chunk("trade routes crossed the silk road", doc_id, 200),
    ];
    let embeddings = embed_all(&embedder, &chunks).await;
    index.append(&chunks, &embeddings).await.unwrap();

    let retriever = index.retriever().await.unwrap().expect("index exists");
    let results = retriever
        .retrieve("how does osmosis move water", 2)
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert!(results[0].chunk.text.contains("osmosis"));
}

#[tokio::test]
async fn given_repeated_builds_when_appending_then_records_accumulate() {
    let dir = tempfile::tempdir().unwrap();
    let embedder = Arc::new(HashEmbedder::new(256));
    let index = DiskVectorIndex::new(dir.path(), "chunks", embedder.clone());
    let doc_id = DocumentId::new();

    let first = vec![chunk("alpha beta", doc_id, 0)];
    index
        .append(&first, &embed_all(&embedder, &first).await)
        .await
        .unwrap();

    let second = vec![chunk("gamma delta", doc_id, 50)];
    index
        .append(&second, &embed_all(&embedder, &second).await)
        .await
        .unwrap();

    let retriever = index.retriever().await.unwrap().expect("index exists");
    let results = retriever.retrieve("alpha beta gamma delta", 10).await.unwrap();

    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn given_mismatched_embedding_count_when_appending_then_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let embedder = Arc::new(HashEmbedder::default());
    let index = DiskVectorIndex::new(dir.path(), "chunks", embedder.clone());
    let doc_id = DocumentId::new();

    let chunks = vec![chunk("alpha", doc_id, 0), chunk("beta", doc_id, 10)];
    let embeddings = vec![embedder.embed("alpha").await.unwrap()];

    let result = index.append(&chunks, &embeddings).await;

    assert!(matches!(
        result,
        Err(VectorIndexError::CountMismatch { .. })
    ));
}

#[tokio::test]
async fn given_duplicate_chunks_when_retrieving_then_mmr_prefers_diversity() {
    let dir = tempfile::tempdir().unwrap();
    let embedder = Arc::new(HashEmbedder::new(256));
    let index = DiskVectorIndex::new(dir.path(), "chunks", embedder.clone());
    let doc_id = DocumentId::new();

    let chunks = vec![
        chunk("alpha beta", doc_id, 0),
        chunk("alpha beta", doc_id, 100),
        chunk("alpha gamma gamma gamma", doc_id, 200),
    ];
    let embeddings = embed_all(&embedder, &chunks).await;
    index.append(&chunks, &embeddings).await.unwrap();

    let retriever = index.retriever().await.unwrap().expect("index exists");
    let results = retriever.retrieve("alpha beta gamma", 2).await.unwrap();

    assert_eq!(results.len(), 2);
    let texts: Vec<&str> = results.iter().map(|r| r.chunk.text.as_str()).collect();
    assert!(
        texts.contains(&"alpha gamma gamma gamma"),
        "second pick should trade rank for diversity, got {:?}",
        texts
    );
}
