use super::{GenerationInput, ProviderOutput, VideoProvider};
use crate::{Error, Result, config::ReplicateConfig};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

pub struct ReplicateClient {
    client: reqwest::Client,
    config: ReplicateConfig,
    api_token: String,
}

#[derive(Debug, Serialize)]
struct PredictionRequest<'a> {
    version: &'a str,
    input: &'a GenerationInput,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    status: String,
    #[serde(default)]
    output: Value,
    #[serde(default)]
    error: Value,
}

impl ReplicateClient {
    pub fn new(config: ReplicateConfig, api_token: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()?;

        Ok(Self {
            client,
            config,
            api_token,
        })
    }

    fn predictions_url(&self) -> String {
        format!("{}/v1/predictions", self.config.base_url)
    }
}

#[async_trait]
impl VideoProvider for ReplicateClient {
    async fn generate(&self, input: &GenerationInput) -> Result<ProviderOutput> {
        debug!(
            model = %self.config.model,
            version = %self.config.version,
            "Sending prediction request to Replicate"
        );

        // Prefer: wait turns the prediction into a blocking call; Replicate
        // holds the connection open until the model finishes.
        let response = self
            .client
            .post(self.predictions_url())
            .bearer_auth(&self.api_token)
            .header("Prefer", "wait")
            .json(&PredictionRequest {
                version: &self.config.version,
                input,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::provider(format!(
                "Replicate API returned {status}: {body}"
            )));
        }

        let prediction: Prediction = response.json().await?;

        debug!(status = %prediction.status, "Received prediction from Replicate");

        match prediction.status.as_str() {
            "failed" | "canceled" => Err(Error::provider(format!(
                "prediction {}: {}",
                prediction.status, prediction.error
            ))),
            _ => Ok(ProviderOutput::from_value(&prediction.output)),
        }
    }
}
