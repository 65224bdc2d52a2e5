//! Collection and record types
//!
//! These types define the structure of collections, stored records and
//! query results. Scoring and indexing live in the engine crate.

use crate::metadata::Metadata;
use serde::{Deserialize, Serialize};

/// Distance metric for similarity calculation
///
/// All metrics are normalized to "higher = more similar".
/// This normalization is part of the interface contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Cosine similarity: dot(a,b) / (||a|| * ||b||)
    /// Range: [-1, 1], higher = more similar
    #[default]
    Cosine,

    /// Euclidean similarity: 1 / (1 + l2_distance)
    /// Range: (0, 1], higher = more similar
    #[serde(alias = "l2")]
    Euclidean,

    /// Dot product (raw value)
    /// Range: unbounded, higher = more similar
    #[serde(alias = "ip", alias = "dot")]
    DotProduct,
}

impl DistanceMetric {
    /// Human-readable name for display
    pub fn name(&self) -> &'static str {
        match self {
            DistanceMetric::Cosine => "cosine",
            DistanceMetric::Euclidean => "euclidean",
            DistanceMetric::DotProduct => "dot_product",
        }
    }

    /// Parse from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cosine" => Some(DistanceMetric::Cosine),
            "euclidean" | "l2" => Some(DistanceMetric::Euclidean),
            "dot_product" | "dot" | "ip" | "inner_product" => Some(DistanceMetric::DotProduct),
            _ => None,
        }
    }
}

impl std::fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Options accepted when creating a collection
///
/// Every field is optional: a collection without a dimension fixes it on the
/// first insert, and the metric defaults to cosine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionOptions {
    /// Embedding dimension (must be > 0 when given)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<usize>,

    /// Distance metric, cosine if unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<DistanceMetric>,

    /// Collection-level metadata (e.g. a description)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl CollectionOptions {
    /// Options with every field unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the dimension at creation time
    pub fn dimension(mut self, dimension: usize) -> Self {
        self.dimension = Some(dimension);
        self
    }

    /// Choose the distance metric
    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = Some(metric);
        self
    }

    /// Attach collection-level metadata
    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Metric with the default applied
    pub fn resolved_metric(&self) -> DistanceMetric {
        self.metric.unwrap_or_default()
    }
}

/// Collection summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionInfo {
    /// Registry-wide sequence number, unique for the lifetime of a collection
    pub id: u64,

    /// Collection name
    pub name: String,

    /// Fixed dimension, `None` until the first insert when not given at creation
    pub dimension: Option<usize>,

    /// Distance metric
    pub metric: DistanceMetric,

    /// Current record count
    pub count: usize,

    /// Creation timestamp (microseconds since epoch)
    pub created_at: i64,

    /// Collection-level metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// A stored record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// User-provided identifier (unique within the collection)
    pub id: String,

    /// Embedding vector
    pub vector: Vec<f32>,

    /// Optional scalar metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,

    /// Optional document text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
}

impl Record {
    /// Record with only an id and a vector
    pub fn new(id: impl Into<String>, vector: Vec<f32>) -> Self {
        Record {
            id: id.into(),
            vector,
            metadata: None,
            document: None,
        }
    }

    /// Attach metadata
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Attach a document
    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.document = Some(document.into());
        self
    }

    /// Get the embedding dimension
    pub fn dimension(&self) -> usize {
        self.vector.len()
    }
}

/// Query result entry
///
/// Score is always "higher = more similar" regardless of the metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorMatch {
    /// Record identifier
    pub id: String,

    /// Similarity score (higher = more similar)
    pub score: f32,

    /// Record metadata, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,

    /// Record document, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
}
