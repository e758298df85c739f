use std::sync::Arc;

use crate::application::ports::{
    GenerativeModel, PromptMessage, RepositoryError, StudyRepository, VectorIndex,
};
use crate::domain::{ChatMessage, DocumentId, MessageRole, SessionId};

use super::reasoning::strip_reasoning;

/// Reply stored and shown when no knowledge base has been built yet.
pub const KNOWLEDGE_BASE_PROMPT: &str = "Please create a knowledge base first.";

const SYSTEM_INSTRUCTION: &str = "You are an educational assistant designed to help students understand their textbooks. Follow these guidelines:\n\
1. Answer questions using only the information from the uploaded PDFs.\n\
2. Use simple, clear language suitable for a students.\n\
3. If the answer isn't in the documents, say: 'I cannot find relevant information in the provided documents.'\n\
4. Do not speculate, assume, or invent information.\n\
5. Maintain a professional tone and organize responses clearly (e.g., bullet points, step-by-step explanations).\n\
6. Encourage follow-up questions by asking if further clarification is needed.\n\
7. Provide examples to clarify concepts when helpful.\n\
8. Keep answers concise, focused, and exam-friendly.";

/// What a chat turn produced. Callers can distinguish a missing knowledge
/// base from a backend failure without inspecting message text.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatOutcome {
    Answered { content: String },
    KnowledgeBaseMissing,
    Failed { reason: String },
}

impl ChatOutcome {
    /// The text persisted as the assistant's reply for this turn.
    pub fn reply_text(&self) -> String {
        match self {
            ChatOutcome::Answered { content } => content.clone(),
            ChatOutcome::KnowledgeBaseMissing => KNOWLEDGE_BASE_PROMPT.to_string(),
            ChatOutcome::Failed { reason } => format!("Error: {reason}"),
        }
    }
}

pub struct ChatService<G, V>
where
    G: GenerativeModel,
    V: VectorIndex,
{
    model: Arc<G>,
    index: Arc<V>,
    repository: Arc<dyn StudyRepository>,
    top_k: usize,
}

impl<G, V> ChatService<G, V>
where
    G: GenerativeModel,
    V: VectorIndex,
{
    pub fn new(
        model: Arc<G>,
        index: Arc<V>,
        repository: Arc<dyn StudyRepository>,
        top_k: usize,
    ) -> Self {
        Self {
            model,
            index,
            repository,
            top_k,
        }
    }

    /// One turn of retrieval-augmented chat. Both sides of the exchange are
    /// appended to the document's session; retrieval and model failures
    /// degrade to a visible reply, never a crashed session. Only persistence
    /// failures surface as errors.
    #[tracing::instrument(skip(self, question), fields(document_id = %document_id.as_uuid()))]
    pub async fn ask(
        &self,
        document_id: DocumentId,
        question: &str,
    ) -> Result<ChatOutcome, ChatError> {
        let session = self.repository.get_or_create_session(document_id).await?;

        self.append(session.id, MessageRole::User, question.to_string())
            .await?;

        let outcome = self.answer(question).await;

        self.append(session.id, MessageRole::Assistant, outcome.reply_text())
            .await?;

        Ok(outcome)
    }

    async fn answer(&self, question: &str) -> ChatOutcome {
        let retriever = match self.index.retriever().await {
            Ok(Some(retriever)) => retriever,
            Ok(None) => return ChatOutcome::KnowledgeBaseMissing,
            Err(e) => {
                tracing::warn!(error = %e, "Retriever unavailable");
                return ChatOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        let results = match retriever.retrieve(question, self.top_k).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(error = %e, "Retrieval failed");
                return ChatOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        let context = results
            .iter()
            .map(|r| r.chunk.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let user_message = format!(
            "Context:\n{context}\n\n\
             Question: {question}\n\n\
             Provide a precise and well-structured answer based on the context above. \
             Ensure your response is easy to understand, includes examples where necessary, \
             and is formatted in a way that students can use it for exams. \
             If applicable, ask if the student needs further clarification."
        );

        let messages = [
            PromptMessage::system(SYSTEM_INSTRUCTION),
            PromptMessage::user(user_message),
        ];

        match self.model.complete(&messages).await {
            Ok(completion) => ChatOutcome::Answered {
                content: strip_reasoning(&completion),
            },
            Err(e) => {
                tracing::warn!(error = %e, "Completion failed");
                ChatOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn append(
        &self,
        session_id: SessionId,
        role: MessageRole,
        content: String,
    ) -> Result<(), ChatError> {
        let message = ChatMessage::new(session_id, role, content);
        self.repository.append_message(&message).await?;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("persistence: {0}")]
    Repository(#[from] RepositoryError),
}
