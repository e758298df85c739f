use async_trait::async_trait;

/// Two-stage flashcard generation: candidate questions from a passage, then
/// an answer for an accepted question grounded in the same passage.
#[async_trait]
pub trait CardModel: Send + Sync {
    async fn generate_questions(&self, passage: &str) -> Result<Vec<String>, CardModelError>;

    async fn generate_answer(
        &self,
        question: &str,
        passage: &str,
    ) -> Result<String, CardModelError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CardModelError {
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("tokenization failed: {0}")]
    TokenizationFailed(String),
    #[error("inference failed: {0}")]
    InferenceFailed(String),
}
