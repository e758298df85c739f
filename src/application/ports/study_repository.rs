use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{
    ChatMessage, ChatSession, Document, DocumentId, Flashcard, SessionId, Summary, SummaryId,
};

/// Persistence seam for study artifacts.
///
/// Contract: message listings are ordered by `created_at` ascending;
/// `replace_flashcards` swaps a summary's card set in one step (no window
/// where the old set is gone and the new one not yet written); deleting a
/// document cascades to its summaries, flashcards, sessions and messages.
#[async_trait]
pub trait StudyRepository: Send + Sync {
    async fn create_document(&self, document: &Document) -> Result<(), RepositoryError>;

    async fn get_document(&self, id: DocumentId) -> Result<Option<Document>, RepositoryError>;

    async fn mark_processed(&self, id: DocumentId) -> Result<(), RepositoryError>;

    async fn delete_document(&self, id: DocumentId) -> Result<(), RepositoryError>;

    async fn create_summary(&self, summary: &Summary) -> Result<(), RepositoryError>;

    async fn get_summary(&self, id: SummaryId) -> Result<Option<Summary>, RepositoryError>;

    async fn list_summaries(&self, document_id: DocumentId)
        -> Result<Vec<Summary>, RepositoryError>;

    async fn replace_flashcards(
        &self,
        summary_id: SummaryId,
        cards: &[Flashcard],
    ) -> Result<(), RepositoryError>;

    async fn list_flashcards(
        &self,
        summary_id: SummaryId,
    ) -> Result<Vec<Flashcard>, RepositoryError>;

    async fn get_or_create_session(
        &self,
        document_id: DocumentId,
    ) -> Result<ChatSession, RepositoryError>;

    async fn append_message(&self, message: &ChatMessage) -> Result<(), RepositoryError>;

    async fn list_messages(&self, session_id: SessionId)
        -> Result<Vec<ChatMessage>, RepositoryError>;
}
