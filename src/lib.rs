pub mod config;
pub mod error;
pub mod export;
pub mod gemini;
pub mod history;
pub mod logger;
pub mod models;
pub mod orchestrator;

pub use config::{AppConfig, GeminiConfig};
pub use error::{GenerationError, Result, VibeWallError};
pub use gemini::{ImageClient, ImageGenerator};
pub use history::{HistoryStorage, HistoryStore, JsonFileStorage, MemoryStorage};
pub use models::GeneratedImage;
pub use orchestrator::{AppState, Orchestrator, Phase};
