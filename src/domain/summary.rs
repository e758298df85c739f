use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::DocumentId;

/// A condensed rendition of one topic's text. Created once per
/// generate-summary action and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub id: SummaryId,
    pub document_id: DocumentId,
    pub topic_title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Summary {
    pub fn new(document_id: DocumentId, topic_title: String, content: String) -> Self {
        Self {
            id: SummaryId::new(),
            document_id,
            topic_title,
            content,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SummaryId(Uuid);

impl SummaryId {
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

impl Default for SummaryId {
    fn default() -> Self {
        Self::new()
    }
}
