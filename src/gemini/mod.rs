pub mod image_client;

use crate::{error::GenerationError, models::GeneratedImage};
use async_trait::async_trait;

pub use image_client::ImageClient;

/// Anything that can turn a prompt into a batch of wallpapers.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Vec<GeneratedImage>, GenerationError>;
}
