mod card_model;
mod document_source;
mod embedder;
mod generative_model;
mod repository_error;
mod retriever;
mod study_repository;
mod text_splitter;
mod vector_index;

pub use card_model::{CardModel, CardModelError};
pub use document_source::{DocumentSource, PdfSourceError};
pub use embedder::{Embedder, EmbedderError};
pub use generative_model::{GenerativeModel, GenerativeModelError, PromptMessage, PromptRole};
pub use repository_error::RepositoryError;
pub use retriever::{Retriever, RetrieverError, ScoredChunk};
pub use study_repository::StudyRepository;
pub use text_splitter::{TextSplitter, TextSplitterError};
pub use vector_index::{VectorIndex, VectorIndexError};
