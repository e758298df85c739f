mod chat_service;
mod flashcard_service;
mod indexing_service;
mod outline_service;
mod passage_builder;
mod reasoning;
mod summary_service;

pub use chat_service::{ChatError, ChatOutcome, ChatService, KNOWLEDGE_BASE_PROMPT};
pub use flashcard_service::{FlashcardError, FlashcardService};
pub use indexing_service::{IndexingError, IndexingService};
pub use outline_service::{OutlineError, OutlineService};
pub use passage_builder::{build_passages, split_sentences};
pub use reasoning::strip_reasoning;
pub use summary_service::{SummaryError, SummaryService};
