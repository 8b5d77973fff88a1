use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::{l2_distance, Embedding};

/// Errors from closet persistence and lookup.
///
/// The store never swallows failures; callers decide whether to degrade
/// to in-memory-only operation or surface the error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("closet file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("closet file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("vector dimension mismatch: expected {expected}, got {got}")]
    Dimension { expected: usize, got: usize },
}

/// Persisted collection of (embedding, label) pairs with brute-force
/// nearest-neighbor search.
///
/// The two sequences are co-indexed: `vectors[i]` belongs to `labels[i]`.
/// Every successful `add` rewrites the whole file at `path`; the file is
/// the only durable copy.
#[derive(Debug)]
pub struct ClosetStore {
    vectors: Vec<Embedding>,
    labels: Vec<String>,
    dimension: usize,
    path: PathBuf,
}

#[derive(Serialize, Deserialize)]
struct StoreData {
    dimension: usize,
    vectors: Vec<Embedding>,
    labels: Vec<String>,
}

impl ClosetStore {
    /// Create an empty store that will persist to `path`.
    pub fn new(dimension: usize, path: PathBuf) -> Self {
        Self {
            vectors: Vec::new(),
            labels: Vec::new(),
            dimension,
            path,
        }
    }

    /// Open a store, loading any state previously persisted at `path`.
    ///
    /// A missing file yields an empty store. An unreadable or corrupt
    /// file is an error; so is a file recorded at a different
    /// dimensionality.
    pub fn open(dimension: usize, path: PathBuf) -> Result<Self, StoreError> {
        if !path.exists() {
            tracing::debug!("no closet file at {}, starting empty", path.display());
            return Ok(Self::new(dimension, path));
        }

        let content = fs::read_to_string(&path)?;
        let data: StoreData = serde_json::from_str(&content)?;

        if data.dimension != dimension {
            return Err(StoreError::Dimension {
                expected: dimension,
                got: data.dimension,
            });
        }
        if data.vectors.len() != data.labels.len() {
            return Err(StoreError::Corrupt(serde::de::Error::custom(
                "vectors and labels have different lengths",
            )));
        }

        let mut store = Self::new(dimension, path);
        for (vector, label) in data.vectors.into_iter().zip(data.labels) {
            if vector.len() != dimension {
                return Err(StoreError::Dimension {
                    expected: dimension,
                    got: vector.len(),
                });
            }
            store.vectors.push(vector);
            store.labels.push(label);
        }

        tracing::debug!("loaded {} closet items", store.labels.len());
        Ok(store)
    }

    /// Append an item and rewrite the persistence file.
    ///
    /// The in-memory append is kept even if the disk write fails, so the
    /// caller can choose to continue in-memory-only for the session.
    /// Duplicate vectors and labels are permitted.
    pub fn add(&mut self, vector: Embedding, label: String) -> Result<(), StoreError> {
        if vector.len() != self.dimension {
            return Err(StoreError::Dimension {
                expected: self.dimension,
                got: vector.len(),
            });
        }

        self.vectors.push(vector);
        self.labels.push(label);
        self.save()
    }

    /// Labels of the `k` stored vectors closest to `query` by Euclidean
    /// distance, nearest first.
    ///
    /// An empty store yields an empty result. When `k` exceeds the
    /// stored count, every stored label is returned once (fewer than
    /// `k` results).
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<String>, StoreError> {
        if query.len() != self.dimension {
            return Err(StoreError::Dimension {
                expected: self.dimension,
                got: query.len(),
            });
        }
        if self.vectors.is_empty() {
            return Ok(vec![]);
        }

        let mut ranked: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (i, l2_distance(query, v)))
            .collect();

        ranked.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(k);

        Ok(ranked.into_iter().map(|(i, _)| self.labels[i].clone()).collect())
    }

    /// Every stored label, in insertion order.
    pub fn get_all_items(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the whole file. Writes to a sibling temp file first and
    /// renames it over the target, so a crash mid-write cannot leave a
    /// half-written closet behind.
    fn save(&self) -> Result<(), StoreError> {
        let data = StoreData {
            dimension: self.dimension,
            vectors: self.vectors.clone(),
            labels: self.labels.clone(),
        };
        let content = serde_json::to_string(&data)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
