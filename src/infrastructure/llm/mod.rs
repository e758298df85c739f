mod candle_t5_card_model;
mod hash_embedder;
mod mock_card_model;
mod mock_generative_model;
mod ollama_client;
mod ollama_embedder;

pub use candle_t5_card_model::CandleT5CardModel;
pub use hash_embedder::HashEmbedder;
pub use mock_card_model::{FailingCardModel, MockCardModel};
pub use mock_generative_model::{EchoGenerativeModel, FailingGenerativeModel};
pub use ollama_client::OllamaChatClient;
pub use ollama_embedder::OllamaEmbedder;
