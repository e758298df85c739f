use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::SummaryId;

#[derive(Debug, Clone, PartialEq)]
pub struct Flashcard {
    pub id: FlashcardId,
    pub summary_id: SummaryId,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

impl Flashcard {
    pub fn new(summary_id: SummaryId, question: String, answer: String) -> Self {
        Self {
            id: FlashcardId::new(),
            summary_id,
            question,
            answer,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlashcardId(Uuid);

impl FlashcardId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for FlashcardId {
    fn default() -> Self {
        Self::new()
    }
}
