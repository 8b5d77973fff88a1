mod classifier;
mod embedder;
mod hub;
mod stylist;

pub use classifier::{HubClassifier, MockClassifier};
pub use embedder::{HubEmbedder, MockEmbedder};
pub use hub::HubClient;
pub use stylist::{HubStylist, MockStylist};

use anyhow::Result;
use async_trait::async_trait;

use crate::closet::Embedding;
use crate::outfit::{Event, Weather};

/// Label reported when classification fails.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Explanation reported when text generation fails.
pub const EXPLANATION_FALLBACK: &str = "Sorry, could not generate explanation.";

/// Predicts a clothing category for an image.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, image: &[u8]) -> Result<String>;

    fn model_name(&self) -> &str;
}

/// Maps an image to a fixed-length feature vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, image: &[u8]) -> Result<Embedding>;

    fn dimension(&self) -> usize;

    fn model_name(&self) -> &str;
}

/// Generates a natural-language explanation for an outfit.
#[async_trait]
pub trait Stylist: Send + Sync {
    async fn explain(&self, items: &[String], weather: Weather, event: Event) -> Result<String>;

    fn model_name(&self) -> &str;
}
