use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const BATCH_SIZE: u32 = 4;
pub const ASPECT_RATIO: &str = "9:16";
pub const OUTPUT_MIME_TYPE: &str = "image/jpeg";
pub const PROMPT_SUFFIX: &str = "9:16 aspect ratio, phone wallpaper, high quality, stunning detail";

/// One wallpaper from a generation batch. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub id: String,
    pub image_data: Vec<u8>, // raw JPEG bytes
}

impl GeneratedImage {
    pub fn new(image_data: Vec<u8>) -> Self {
        Self {
            id: format!("img-{}", Uuid::new_v4().simple()),
            image_data,
        }
    }
}

/// The fixed target every generation request is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallpaperSpec {
    pub batch_size: u32,
    pub aspect_ratio: &'static str,
    pub mime_type: &'static str,
}

impl Default for WallpaperSpec {
    fn default() -> Self {
        Self {
            batch_size: BATCH_SIZE,
            aspect_ratio: ASPECT_RATIO,
            mime_type: OUTPUT_MIME_TYPE,
        }
    }
}

impl WallpaperSpec {
    pub fn augment_prompt(&self, prompt: &str) -> String {
        format!("{}, {}", prompt, PROMPT_SUFFIX)
    }

    pub fn to_request(&self, prompt: &str) -> ImagenPredictRequest {
        ImagenPredictRequest {
            instances: vec![ImagenInstance {
                prompt: self.augment_prompt(prompt),
            }],
            parameters: ImagenParameters {
                sample_count: self.batch_size,
                aspect_ratio: self.aspect_ratio.to_string(),
                output_options: ImagenOutputOptions {
                    mime_type: self.mime_type.to_string(),
                },
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImagenPredictRequest {
    pub instances: Vec<ImagenInstance>,
    pub parameters: ImagenParameters,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImagenInstance {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagenParameters {
    pub sample_count: u32,
    pub aspect_ratio: String,
    pub output_options: ImagenOutputOptions,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagenOutputOptions {
    pub mime_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImagenPredictResponse {
    #[serde(default)]
    pub predictions: Vec<ImagenPrediction>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagenPrediction {
    pub bytes_base64_encoded: Option<String>,
    pub mime_type: Option<String>,
    pub rai_filtered_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_carries_fixed_target() {
        let request = WallpaperSpec::default().to_request("neon koi pond");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "instances": [{
                    "prompt": "neon koi pond, 9:16 aspect ratio, phone wallpaper, high quality, stunning detail"
                }],
                "parameters": {
                    "sampleCount": 4,
                    "aspectRatio": "9:16",
                    "outputOptions": { "mimeType": "image/jpeg" }
                }
            })
        );
    }

    #[test]
    fn blocked_response_parses_without_bytes() {
        let response: ImagenPredictResponse = serde_json::from_value(json!({
            "predictions": [{ "raiFilteredReason": "blocked" }]
        }))
        .unwrap();

        assert_eq!(response.predictions.len(), 1);
        assert!(response.predictions[0].bytes_base64_encoded.is_none());

        let empty: ImagenPredictResponse = serde_json::from_value(json!({})).unwrap();
        assert!(empty.predictions.is_empty());
    }

    #[test]
    fn image_ids_are_fresh() {
        let a = GeneratedImage::new(vec![1]);
        let b = GeneratedImage::new(vec![1]);
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("img-"));
    }
}
