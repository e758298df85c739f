mod chat_message;
mod chat_session;
mod chunk;
mod document;
mod embedding;
mod flashcard;
mod heading;
mod message_role;
mod summary;
mod topic;

pub use chat_message::{ChatMessage, MessageId};
pub use chat_session::{ChatSession, SessionId};
pub use chunk::{Chunk, ChunkId};
pub use document::{Document, DocumentId, OwnerId};
pub use embedding::Embedding;
pub use flashcard::{Flashcard, FlashcardId};
pub use heading::Heading;
pub use message_role::MessageRole;
pub use summary::{Summary, SummaryId};
pub use topic::{topics_from_headings, Topic};
