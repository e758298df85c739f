use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::DocumentId;

/// One chat session per document, created lazily on first use.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSession {
    pub id: SessionId,
    pub document_id: DocumentId,
    pub created_at: DateTime<Utc>,
}

impl ChatSession {
    pub fn new(document_id: DocumentId) -> Self {
        Self {
            id: SessionId::new(),
            document_id,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
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

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}
