//! Vector index backend trait
//!
//! Defines the interface for swappable vector index implementations.
//! `BruteForce` is the only backend today; an approximate index must keep the
//! same ranking contract.

use crate::brute_force::BruteForceBackend;
use quiver_core::{CancellationToken, DistanceMetric, Result};
use serde::{Deserialize, Serialize};

/// Per-collection insertion sequence of a record
pub type RecordSeq = u64;

/// Trait for swappable vector index implementations
///
/// Vectors are keyed by their insertion sequence, which the collection
/// assigns. Do NOT add methods that assume brute-force semantics (like
/// iterating every vector in score order): an indexed backend could not
/// provide them.
pub trait VectorIndexBackend: Send + Sync {
    /// Insert a vector (upsert semantics)
    ///
    /// If the sequence already exists, replaces the embedding.
    fn insert(&mut self, seq: RecordSeq, embedding: Vec<f32>);

    /// Delete a vector
    ///
    /// Returns true if the vector existed and was deleted.
    fn delete(&mut self, seq: RecordSeq) -> bool;

    /// Search for the `k` best-scoring vectors accepted by `accept`
    ///
    /// Scores are normalized to "higher = more similar". Results are sorted
    /// by (score desc, seq asc). Cancellation is checked periodically and
    /// surfaces as an error.
    fn search(
        &self,
        query: &[f32],
        k: usize,
        accept: &dyn Fn(RecordSeq) -> bool,
        cancel: &CancellationToken,
    ) -> Result<Vec<(RecordSeq, f32)>>;

    /// Get number of indexed vectors
    fn len(&self) -> usize;

    /// Check if empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get distance metric
    fn metric(&self) -> DistanceMetric;

    /// Get a vector by sequence
    fn get(&self, seq: RecordSeq) -> Option<&[f32]>;

    /// Check if a vector exists
    fn contains(&self, seq: RecordSeq) -> bool {
        self.get(seq).is_some()
    }

    /// Remove every vector
    fn clear(&mut self);
}

/// Factory for creating index backends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexBackendFactory {
    /// Exact O(n) search
    #[default]
    BruteForce,
}

impl IndexBackendFactory {
    /// Create a new backend instance
    pub fn create(&self, metric: DistanceMetric) -> Box<dyn VectorIndexBackend> {
        match self {
            IndexBackendFactory::BruteForce => Box::new(BruteForceBackend::new(metric)),
        }
    }
}
