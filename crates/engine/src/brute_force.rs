//! Brute-force vector search
//!
//! Scores every accepted vector and keeps the top k. Iteration runs in
//! sequence order (BTreeMap), so ties resolve to the earliest insert without
//! extra bookkeeping.

use crate::backend::{RecordSeq, VectorIndexBackend};
use crate::distance::score;
use quiver_core::{check_cancelled, CancellationToken, DistanceMetric, Result};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Records scored between cancellation checks
pub const CANCEL_CHECK_INTERVAL: usize = 256;

/// Exact linear-scan backend
pub struct BruteForceBackend {
    metric: DistanceMetric,
    vectors: BTreeMap<RecordSeq, Vec<f32>>,
}

impl BruteForceBackend {
    /// Empty backend scoring with `metric`
    pub fn new(metric: DistanceMetric) -> Self {
        BruteForceBackend {
            metric,
            vectors: BTreeMap::new(),
        }
    }
}

/// Ranking order: score descending, then sequence ascending.
fn rank(a: &(RecordSeq, f32), b: &(RecordSeq, f32)) -> Ordering {
    b.1.total_cmp(&a.1).then(a.0.cmp(&b.0))
}

impl VectorIndexBackend for BruteForceBackend {
    fn insert(&mut self, seq: RecordSeq, embedding: Vec<f32>) {
        self.vectors.insert(seq, embedding);
    }

    fn delete(&mut self, seq: RecordSeq) -> bool {
        self.vectors.remove(&seq).is_some()
    }

    fn search(
        &self,
        query: &[f32],
        k: usize,
        accept: &dyn Fn(RecordSeq) -> bool,
        cancel: &CancellationToken,
    ) -> Result<Vec<(RecordSeq, f32)>> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(RecordSeq, f32)> = Vec::new();
        for (i, (&seq, vector)) in self.vectors.iter().enumerate() {
            if i % CANCEL_CHECK_INTERVAL == 0 {
                check_cancelled(cancel)?;
            }
            if !accept(seq) {
                continue;
            }
            scored.push((seq, score(self.metric, query, vector)));

            // Keep memory bounded on large collections.
            if scored.len() >= k.saturating_mul(4).max(1024) {
                scored.sort_unstable_by(rank);
                scored.truncate(k);
            }
        }

        scored.sort_unstable_by(rank);
        scored.truncate(k);
        Ok(scored)
    }

    fn len(&self) -> usize {
        self.vectors.len()
    }

    fn metric(&self) -> DistanceMetric {
        self.metric
    }

    fn get(&self, seq: RecordSeq) -> Option<&[f32]> {
        self.vectors.get(&seq).map(|v| v.as_slice())
    }

    fn clear(&mut self) {
        self.vectors.clear();
    }
}
