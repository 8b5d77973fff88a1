use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use super::{Classifier, HubClient};

/// Remote image classifier over the Hugging Face Inference API.
pub struct HubClassifier {
    client: Arc<HubClient>,
    model: String,
}

impl HubClassifier {
    pub fn new(client: Arc<HubClient>) -> Self {
        Self {
            client,
            model: "facebook/deit-base-distilled-patch16-224".to_string(),
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }
}

#[derive(Debug, Deserialize)]
struct Prediction {
    label: String,
    #[allow(dead_code)]
    score: f32,
}

#[async_trait]
impl Classifier for HubClassifier {
    async fn classify(&self, image: &[u8]) -> Result<String> {
        let json = self.client.post_bytes(&self.model, image.to_vec()).await?;

        // The endpoint returns predictions sorted by score descending
        let predictions: Vec<Prediction> =
            serde_json::from_value(json).context("Unexpected classification response shape")?;

        predictions
            .into_iter()
            .next()
            .map(|p| p.label)
            .context("Classification returned no predictions")
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Fixed-answer classifier for tests.
pub struct MockClassifier {
    label: String,
}

impl MockClassifier {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
        }
    }
}

#[async_trait]
impl Classifier for MockClassifier {
    async fn classify(&self, _image: &[u8]) -> Result<String> {
        Ok(self.label.clone())
    }

    fn model_name(&self) -> &str {
        "mock-classifier"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_classifier_returns_configured_label() {
        let classifier = MockClassifier::new("denim jacket");
        let label = classifier.classify(b"bytes").await.unwrap();
        assert_eq!(label, "denim jacket");
    }

    #[test]
    fn test_prediction_response_parses() {
        let json = serde_json::json!([
            {"label": "jersey, T-shirt, tee shirt", "score": 0.82},
            {"label": "sweatshirt", "score": 0.11}
        ]);
        let predictions: Vec<Prediction> = serde_json::from_value(json).unwrap();
        assert_eq!(predictions[0].label, "jersey, T-shirt, tee shirt");
    }
}
