use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{HubClient, Stylist};
use crate::outfit::{Event, Weather};

/// Remote text2text stylist over the Hugging Face Inference API.
pub struct HubStylist {
    client: Arc<HubClient>,
    model: String,
    max_new_tokens: u32,
}

impl HubStylist {
    pub fn new(client: Arc<HubClient>) -> Self {
        Self {
            client,
            model: "google/flan-t5-small".to_string(),
            max_new_tokens: 100,
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_max_new_tokens(mut self, max_new_tokens: u32) -> Self {
        self.max_new_tokens = max_new_tokens;
        self
    }
}

fn build_prompt(items: &[String], weather: Weather, event: Event) -> String {
    let outfit_list = items.join(", ");
    format!(
        "You are a fashion stylist. Suggest an outfit using these items: {}. \
         The outfit should be suitable for {} weather and a {} event. \
         Explain why each piece was chosen.",
        outfit_list, weather, event
    )
}

#[derive(Serialize)]
struct GenerationRequest {
    inputs: String,
    parameters: GenerationParameters,
}

#[derive(Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    do_sample: bool,
}

#[derive(Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[async_trait]
impl Stylist for HubStylist {
    async fn explain(&self, items: &[String], weather: Weather, event: Event) -> Result<String> {
        let request = GenerationRequest {
            inputs: build_prompt(items, weather, event),
            parameters: GenerationParameters {
                max_new_tokens: self.max_new_tokens,
                do_sample: false,
            },
        };

        let json = self.client.post_json(&self.model, &request).await?;

        let outputs: Vec<GeneratedText> =
            serde_json::from_value(json).context("Unexpected generation response shape")?;

        outputs
            .into_iter()
            .next()
            .map(|o| o.generated_text)
            .context("Generation returned no text")
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Canned stylist for tests.
pub struct MockStylist {
    response: String,
}

impl MockStylist {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
        }
    }
}

#[async_trait]
impl Stylist for MockStylist {
    async fn explain(&self, _items: &[String], _weather: Weather, _event: Event) -> Result<String> {
        Ok(self.response.clone())
    }

    fn model_name(&self) -> &str {
        "mock-stylist"
    }
}
