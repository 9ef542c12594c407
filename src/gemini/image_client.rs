use crate::{
    config::GeminiConfig,
    error::{GenerationError, Result, VibeWallError},
    gemini::ImageGenerator,
    logger,
    models::{GeneratedImage, ImagenPredictResponse, WallpaperSpec},
};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Client;

/// Talks to the Imagen `predict` endpoint. One HTTP call per `generate`, no retries.
#[derive(Clone)]
pub struct ImageClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    spec: WallpaperSpec,
}

impl ImageClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .ok_or_else(|| VibeWallError::ConfigError("API key is required".into()))?;

        Ok(Self {
            client: Client::new(),
            base_url: config.base_url,
            model: config.model,
            api_key,
            spec: WallpaperSpec::default(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:predict", self.base_url, self.model)
    }

    async fn call(&self, prompt: &str) -> std::result::Result<Vec<GeneratedImage>, GenerationError> {
        let payload = self.spec.to_request(prompt);

        log::info!("Generating wallpapers with model: {}", self.model);
        let _timer = logger::timer("imagen predict");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| GenerationError::TransportFailure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::TransportFailure(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let body: ImagenPredictResponse = response.json().await.map_err(|e| {
            log::error!("Undecodable predict response: {}", e);
            GenerationError::UnknownFailure
        })?;

        decode_predictions(body)
    }
}

/// Turns provider predictions into images, keeping provider order.
pub(crate) fn decode_predictions(
    body: ImagenPredictResponse,
) -> std::result::Result<Vec<GeneratedImage>, GenerationError> {
    let mut images = Vec::with_capacity(body.predictions.len());

    for prediction in body.predictions {
        let Some(encoded) = prediction.bytes_base64_encoded else {
            if let Some(reason) = prediction.rai_filtered_reason {
                log::warn!("Prediction filtered: {}", reason);
            }
            continue;
        };

        let bytes = STANDARD.decode(encoded.as_bytes()).map_err(|e| {
            log::error!("Prediction carried invalid base64: {}", e);
            GenerationError::UnknownFailure
        })?;
        images.push(GeneratedImage::new(bytes));
    }

    if images.is_empty() {
        return Err(GenerationError::EmptyResult);
    }

    Ok(images)
}

#[async_trait]
impl ImageGenerator for ImageClient {
    async fn generate(&self, prompt: &str) -> std::result::Result<Vec<GeneratedImage>, GenerationError> {
        let result = self.call(prompt).await;
        match &result {
            Ok(images) => log::info!("Received {} wallpapers", images.len()),
            Err(e) => log::error!("Error generating wallpapers: {}", e),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImagenPrediction;

    fn prediction(bytes: Option<&str>) -> ImagenPrediction {
        ImagenPrediction {
            bytes_base64_encoded: bytes.map(String::from),
            mime_type: Some("image/jpeg".into()),
            rai_filtered_reason: None,
        }
    }

    #[test]
    fn decodes_in_provider_order() {
        let body = ImagenPredictResponse {
            predictions: vec![prediction(Some("AQI=")), prediction(Some("AwQ="))],
        };

        let images = decode_predictions(body).unwrap();
        assert_eq!(images[0].image_data, vec![1, 2]);
        assert_eq!(images[1].image_data, vec![3, 4]);
        assert_ne!(images[0].id, images[1].id);
    }

    #[test]
    fn no_usable_predictions_is_empty_result() {
        let body = ImagenPredictResponse {
            predictions: vec![prediction(None)],
        };
        assert_eq!(decode_predictions(body), Err(GenerationError::EmptyResult));
        assert_eq!(
            decode_predictions(ImagenPredictResponse::default()),
            Err(GenerationError::EmptyResult)
        );
    }

    #[test]
    fn invalid_base64_is_unknown_failure() {
        let body = ImagenPredictResponse {
            predictions: vec![prediction(Some("***"))],
        };
        assert_eq!(decode_predictions(body), Err(GenerationError::UnknownFailure));
    }

    #[test]
    fn client_requires_api_key() {
        assert!(ImageClient::new(GeminiConfig::new()).is_err());
        assert!(ImageClient::new(GeminiConfig::new().with_api_key("k")).is_ok());
    }
}
