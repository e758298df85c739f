mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    CardModelSettings, ChunkingSettings, IndexSettings, LoggingSettings, OllamaSettings,
    RetrievalSettings, Settings,
};
