//! Similarity scoring
//!
//! All scores are normalized to "higher = more similar":
//! - Cosine: `dot(a,b) / (||a|| * ||b||)`, 0 when either side has zero norm
//! - Euclidean: `1 / (1 + ||a - b||)`
//! - DotProduct: `dot(a,b)`, saturating at the f32 range
//!
//! Callers guarantee `a.len() == b.len()`.

use quiver_core::DistanceMetric;

/// Score `a` against `b` under `metric`
pub fn score(metric: DistanceMetric, a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    match metric {
        DistanceMetric::Cosine => cosine_similarity(a, b),
        DistanceMetric::Euclidean => euclidean_similarity(a, b),
        DistanceMetric::DotProduct => dot_product(a, b),
    }
}

/// Dot product
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    narrow(dot_f64(a, b))
}

/// Euclidean norm
pub fn l2_norm(v: &[f32]) -> f32 {
    narrow(norm_f64(v))
}

/// Cosine similarity in [-1, 1]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let norm_a = norm_f64(a);
    let norm_b = norm_f64(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot_f64(a, b) / (norm_a * norm_b)).clamp(-1.0, 1.0) as f32
}

/// Euclidean distance
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    narrow(distance_f64(a, b))
}

/// Euclidean similarity in [0, 1]
pub fn euclidean_similarity(a: &[f32], b: &[f32]) -> f32 {
    (1.0 / (1.0 + distance_f64(a, b))) as f32
}

// Sums run in f64: the square of any finite f32 is finite there, so large
// components cannot overflow to infinity mid-sum.

fn dot_f64(a: &[f32], b: &[f32]) -> f64 {
    a.iter().zip(b).map(|(&x, &y)| x as f64 * y as f64).sum()
}

fn norm_f64(v: &[f32]) -> f64 {
    v.iter().map(|&x| x as f64 * x as f64).sum::<f64>().sqrt()
}

fn distance_f64(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| {
            let d = x as f64 - y as f64;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Back to f32, saturating at the finite range
fn narrow(value: f64) -> f32 {
    value.clamp(f32::MIN as f64, f32::MAX as f64) as f32
}
