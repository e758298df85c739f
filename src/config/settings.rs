use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub ollama: OllamaSettings,
    pub cards: CardModelSettings,
    pub chunking: ChunkingSettings,
    pub index: IndexSettings,
    pub retrieval: RetrievalSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OllamaSettings {
    pub base_url: String,
    pub chat_model: String,
    pub embedding_model: String,
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardModelSettings {
    pub question_model: String,
    pub answer_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunkingSettings {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndexSettings {
    pub root_dir: PathBuf,
    pub collection: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalSettings {
    pub top_k: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json_format: bool,
}

impl Settings {
    /// Environment-driven settings with the stock defaults: local Ollama,
    /// the T5 card checkpoints, 1200/150 chunking, top-3 retrieval.
    pub fn from_env() -> Self {
        Self {
            ollama: OllamaSettings {
                base_url: env_or("OLLAMA_URL", "http://localhost:11434"),
                chat_model: env_or("CHAT_MODEL", "deepseek-r1:8b"),
                embedding_model: env_or("EMBEDDING_MODEL", "nomic-embed-text"),
                temperature: env_parse_or("CHAT_TEMPERATURE", 0.3),
            },
            cards: CardModelSettings {
                question_model: env_or("QUESTION_MODEL", "valhalla/t5-base-qg-hl"),
                answer_model: env_or("ANSWER_MODEL", "valhalla/t5-small-qa-qg-hl"),
            },
            chunking: ChunkingSettings {
                chunk_size: env_parse_or("CHUNK_SIZE", 1200),
                chunk_overlap: env_parse_or("CHUNK_OVERLAP", 150),
            },
            index: IndexSettings {
                root_dir: PathBuf::from(env_or("INDEX_DIR", "./vector_index")),
                collection: env_or("INDEX_COLLECTION", "chunks"),
            },
            retrieval: RetrievalSettings {
                top_k: env_parse_or("RETRIEVAL_TOP_K", 3),
            },
            logging: LoggingSettings {
                level: env_or("LOG_LEVEL", "info"),
                json_format: env_or("LOG_FORMAT", "plain").to_lowercase() == "json",
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
