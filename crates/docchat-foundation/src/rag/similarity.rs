//! Similarity functions for embedding vectors

use docchat_kernel::rag::SimilarityMetric;

/// Compute similarity between two embedding vectors using the given metric.
///
/// Higher is always more similar. Euclidean distance is mapped through
/// `1 / (1 + distance)`.
pub fn compute_similarity(a: &[f32], b: &[f32], metric: SimilarityMetric) -> f32 {
    match metric {
        SimilarityMetric::Cosine => cosine_similarity(a, b),
        SimilarityMetric::Euclidean => 1.0 / (1.0 + euclidean_distance(a, b)),
        SimilarityMetric::DotProduct => dot_product(a, b),
    }
}

/// Cosine similarity in `[-1, 1]`; zero-magnitude input scores `0.0`.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot = dot_product(a, b);
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f32>()
        .sqrt()
}

fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
