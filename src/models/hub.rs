use anyhow::{Context, Result};
use serde::Serialize;

/// Shared Hugging Face Inference API client.
///
/// Holds the single `reqwest::Client` used by every provider. Built once
/// per process and handed out via `Arc`; nothing here is guarded for
/// concurrent mutation because the CLI is single-consumer throughout.
pub struct HubClient {
    http: reqwest::Client,
    api_base: String,
    token: String,
}

impl HubClient {
    pub fn new(api_base: String, token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base,
            token,
        }
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/models/{}", self.api_base.trim_end_matches('/'), model)
    }

    /// POST raw bytes (an image) to a model endpoint and return the
    /// response body as JSON.
    pub async fn post_bytes(&self, model: &str, bytes: Vec<u8>) -> Result<serde_json::Value> {
        let response = self
            .http
            .post(self.model_url(model))
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Content-Type", "application/octet-stream")
            .body(bytes)
            .send()
            .await
            .context("Failed to send inference request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Inference API error ({}): {}", status, body);
        }

        response
            .json()
            .await
            .context("Failed to parse inference response")
    }

    /// POST a JSON payload to a model endpoint and return the response
    /// body as JSON.
    pub async fn post_json<T: Serialize + Sync>(
        &self,
        model: &str,
        payload: &T,
    ) -> Result<serde_json::Value> {
        let response = self
            .http
            .post(self.model_url(model))
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .context("Failed to send inference request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Inference API error ({}): {}", status, body);
        }

        response
            .json()
            .await
            .context("Failed to parse inference response")
    }
}
