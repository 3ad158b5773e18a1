mod replicate;

pub use replicate::ReplicateClient;

use crate::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// 1x1 transparent PNG used as the conditioning frame for every generation.
const PLACEHOLDER_IMAGE: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

#[async_trait]
pub trait VideoProvider: Send + Sync {
    async fn generate(&self, input: &GenerationInput) -> Result<ProviderOutput>;
}

/// Parameter record for stable-video-diffusion. The model is image-to-video;
/// there is no text field in its input schema, so the caller's prompt never
/// appears here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationInput {
    pub cond_aug: f64,
    pub decoding_t: u32,
    pub input_image: String,
    pub video_length: String,
    pub sizing_strategy: String,
    pub motion_bucket_id: u32,
    pub frames_per_second: u32,
}

impl Default for GenerationInput {
    fn default() -> Self {
        Self {
            cond_aug: 0.02,
            decoding_t: 7,
            input_image: PLACEHOLDER_IMAGE.to_string(),
            video_length: "14_frames_with_svd".to_string(),
            sizing_strategy: "maintain_aspect_ratio".to_string(),
            motion_bucket_id: 127,
            frames_per_second: 6,
        }
    }
}

/// Output shape returned by the provider. Replicate predictions carry either
/// a single URL string or an array of URL strings depending on the model.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutput {
    SingleUrl(String),
    UrlList(Vec<String>),
    Empty,
}

impl ProviderOutput {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(url) => Self::SingleUrl(url.clone()),
            Value::Array(items) => {
                let urls: Vec<String> = items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect();
                if urls.is_empty() {
                    Self::Empty
                } else {
                    Self::UrlList(urls)
                }
            }
            _ => Self::Empty,
        }
    }

    /// The URL to report to the caller: the single URL, the first list
    /// element, or an empty string.
    pub fn into_video_url(self) -> String {
        match self {
            Self::SingleUrl(url) => url,
            Self::UrlList(urls) => urls.into_iter().next().unwrap_or_default(),
            Self::Empty => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_output_from_string_value() {
        let output = ProviderOutput::from_value(&json!("https://example.com/v.mp4"));
        assert_eq!(
            output,
            ProviderOutput::SingleUrl("https://example.com/v.mp4".to_string())
        );
        assert_eq!(output.into_video_url(), "https://example.com/v.mp4");
    }

    #[test]
    fn test_output_from_array_takes_first() {
        let output = ProviderOutput::from_value(&json!([
            "https://example.com/v1.mp4",
            "https://example.com/v2.mp4"
        ]));
        assert_eq!(output.into_video_url(), "https://example.com/v1.mp4");
    }

    #[test]
    fn test_output_from_empty_array_is_empty() {
        let output = ProviderOutput::from_value(&json!([]));
        assert_eq!(output, ProviderOutput::Empty);
        assert_eq!(output.into_video_url(), "");
    }

    #[test]
    fn test_output_from_null_or_object_is_empty() {
        assert_eq!(
            ProviderOutput::from_value(&Value::Null),
            ProviderOutput::Empty
        );
        assert_eq!(
            ProviderOutput::from_value(&json!({"frames": 14})),
            ProviderOutput::Empty
        );
    }

    #[test]
    fn test_output_array_skips_non_strings() {
        let output = ProviderOutput::from_value(&json!([42, "https://example.com/v.mp4"]));
        assert_eq!(output.into_video_url(), "https://example.com/v.mp4");
    }

    #[test]
    fn test_generation_input_serialization() {
        let input = GenerationInput::default();
        let value = serde_json::to_value(&input).unwrap();

        assert_eq!(value["cond_aug"], json!(0.02));
        assert_eq!(value["decoding_t"], json!(7));
        assert_eq!(value["video_length"], json!("14_frames_with_svd"));
        assert_eq!(value["sizing_strategy"], json!("maintain_aspect_ratio"));
        assert_eq!(value["motion_bucket_id"], json!(127));
        assert_eq!(value["frames_per_second"], json!(6));
        assert!(
            value["input_image"]
                .as_str()
                .unwrap()
                .starts_with("data:image/png;base64,")
        );
    }
}
