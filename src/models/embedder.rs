use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;

use super::{Embedder, HubClient};
use crate::closet::Embedding;

/// Remote feature extractor over the Hugging Face Inference API.
pub struct HubEmbedder {
    client: Arc<HubClient>,
    model: String,
    dimension: usize,
}

impl HubEmbedder {
    pub fn new(client: Arc<HubClient>) -> Self {
        Self {
            client,
            model: "microsoft/resnet-50".to_string(),
            dimension: 2048,
        }
    }

    pub fn with_model(mut self, model: &str, dimension: usize) -> Self {
        self.model = model.to_string();
        self.dimension = dimension;
        self
    }
}

/// Collect every innermost float vector in a feature-extraction
/// response. The endpoint returns a flat vector for pooled models and a
/// nested spatial grid otherwise.
fn leaf_vectors(value: &serde_json::Value, out: &mut Vec<Vec<f32>>) {
    if let Some(items) = value.as_array() {
        if items.iter().all(|v| v.is_number()) {
            out.push(
                items
                    .iter()
                    .filter_map(|v| v.as_f64())
                    .map(|v| v as f32)
                    .collect(),
            );
        } else {
            for item in items {
                leaf_vectors(item, out);
            }
        }
    }
}

/// Reduce a response to one vector of the expected length, mean-pooling
/// spatial grids.
fn pool_features(value: &serde_json::Value, dimension: usize) -> Result<Embedding> {
    let mut leaves = Vec::new();
    leaf_vectors(value, &mut leaves);
    leaves.retain(|v| v.len() == dimension);

    if leaves.is_empty() {
        anyhow::bail!("No {}-dimensional features in response", dimension);
    }
    if leaves.len() == 1 {
        return Ok(leaves.remove(0));
    }

    let count = leaves.len() as f32;
    let mut pooled = vec![0.0f32; dimension];
    for leaf in &leaves {
        for (acc, v) in pooled.iter_mut().zip(leaf) {
            *acc += v;
        }
    }
    for acc in pooled.iter_mut() {
        *acc /= count;
    }
    Ok(pooled)
}

#[async_trait]
impl Embedder for HubEmbedder {
    async fn embed(&self, image: &[u8]) -> Result<Embedding> {
        let json = self.client.post_bytes(&self.model, image.to_vec()).await?;
        pool_features(&json, self.dimension)
            .context("Unexpected feature-extraction response shape")
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Mock embedder for tests. Deterministic per input, content-sensitive.
pub struct MockEmbedder {
    dimension: usize,
}

impl MockEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, image: &[u8]) -> Result<Embedding> {
        let hash = image.iter().fold(0u32, |acc, b| acc.wrapping_add(*b as u32));
        Ok((0..self.dimension)
            .map(|i| {
                let val = ((hash.wrapping_mul(i as u32 + 1)) % 1000) as f32 / 1000.0;
                val * 2.0 - 1.0 // Range: -1 to 1
            })
            .collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        "mock-embedder"
    }
}
