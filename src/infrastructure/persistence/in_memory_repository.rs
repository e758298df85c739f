use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{RepositoryError, StudyRepository};
use crate::domain::{
    ChatMessage, ChatSession, Document, DocumentId, Flashcard, SessionId, Summary, SummaryId,
};

/// In-process `StudyRepository`.
///
/// A single write lock around the whole state makes `replace_flashcards` a
/// one-step swap and keeps cascade deletes consistent. Listings preserve
/// insertion order, which matches `created_at` ordering for entities created
/// through this process.
#[derive(Default)]
pub struct InMemoryStudyRepository {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    documents: HashMap<DocumentId, Document>,
    summaries: Vec<Summary>,
    flashcards: Vec<Flashcard>,
    sessions: HashMap<DocumentId, ChatSession>,
    messages: Vec<ChatMessage>,
}

impl InMemoryStudyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudyRepository for InMemoryStudyRepository {
    async fn create_document(&self, document: &Document) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        state.documents.insert(document.id, document.clone());
        Ok(())
    }

    async fn get_document(&self, id: DocumentId) -> Result<Option<Document>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.documents.get(&id).cloned())
    }

    async fn mark_processed(&self, id: DocumentId) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        let document = state
            .documents
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(format!("document {}", id.as_uuid())))?;
        document.processed = true;
        Ok(())
    }

    async fn delete_document(&self, id: DocumentId) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;

        state.documents.remove(&id);

        let summary_ids: Vec<SummaryId> = state
            .summaries
            .iter()
            .filter(|s| s.document_id == id)
            .map(|s| s.id)
            .collect();
        state.summaries.retain(|s| s.document_id != id);
        state
            .flashcards
            .retain(|f| !summary_ids.contains(&f.summary_id));

        let session_id = state.sessions.remove(&id).map(|s| s.id);
        if let Some(session_id) = session_id {
            state.messages.retain(|m| m.session_id != session_id);
        }

        Ok(())
    }

    async fn create_summary(&self, summary: &Summary) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        if !state.documents.contains_key(&summary.document_id) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "document {} does not exist",
                summary.document_id.as_uuid()
            )));
        }
        state.summaries.push(summary.clone());
        Ok(())
    }

    async fn get_summary(&self, id: SummaryId) -> Result<Option<Summary>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.summaries.iter().find(|s| s.id == id).cloned())
    }

    async fn list_summaries(
        &self,
        document_id: DocumentId,
    ) -> Result<Vec<Summary>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .summaries
            .iter()
            .filter(|s| s.document_id == document_id)
            .cloned()
            .collect())
    }

    async fn replace_flashcards(
        &self,
        summary_id: SummaryId,
        cards: &[Flashcard],
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        if !state.summaries.iter().any(|s| s.id == summary_id) {
            return Err(RepositoryError::NotFound(format!(
                "summary {}",
                summary_id.as_uuid()
            )));
        }
        state.flashcards.retain(|f| f.summary_id != summary_id);
        state.flashcards.extend(cards.iter().cloned());
        Ok(())
    }

    async fn list_flashcards(
        &self,
        summary_id: SummaryId,
    ) -> Result<Vec<Flashcard>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .flashcards
            .iter()
            .filter(|f| f.summary_id == summary_id)
            .cloned()
            .collect())
    }

    async fn get_or_create_session(
        &self,
        document_id: DocumentId,
    ) -> Result<ChatSession, RepositoryError> {
        let mut state = self.state.write().await;
        if !state.documents.contains_key(&document_id) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "document {} does not exist",
                document_id.as_uuid()
            )));
        }
        let session = state
            .sessions
            .entry(document_id)
            .or_insert_with(|| ChatSession::new(document_id));
        Ok(session.clone())
    }

    async fn append_message(&self, message: &ChatMessage) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        if !state.sessions.values().any(|s| s.id == message.session_id) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "session {} does not exist",
                message.session_id.as_uuid()
            )));
        }
        state.messages.push(message.clone());
        Ok(())
    }

    async fn list_messages(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let state = self.state.read().await;
        let mut messages: Vec<ChatMessage> = state
            .messages
            .iter()
            .filter(|m| m.session_id == session_id)
            .cloned()
            .collect();
        // stable sort keeps insertion order for identical timestamps
        messages.sort_by_key(|m| m.created_at);
        Ok(messages)
    }
}
