// Utility functions for the visual recommender

use ndarray::{Array1, ArrayView1};

/// Added to norms and denominators so zero vectors score 0 instead of NaN
pub const SIMILARITY_EPSILON: f32 = 1e-8;

/// Euclidean length of a vector
pub fn l2_norm(vec: ArrayView1<'_, f32>) -> f32 {
    vec.dot(&vec).sqrt()
}

/// Element-wise arithmetic mean. Returns None for an empty slice.
pub fn mean_vector(vectors: &[ArrayView1<'_, f32>]) -> Option<Array1<f32>> {
    let first = vectors.first()?;
    let mut sum = Array1::<f32>::zeros(first.len());
    for vec in vectors {
        sum += vec;
    }
    sum /= vectors.len() as f32;
    Some(sum)
}

/// Cosine similarity with precomputed norms.
///
/// `profile_norm` is expected to already include `SIMILARITY_EPSILON`; the
/// epsilon is added once more to the product of norms.
pub fn cosine_similarity(
    profile: ArrayView1<'_, f32>,
    profile_norm: f32,
    item: ArrayView1<'_, f32>,
    item_norm: f32,
) -> f32 {
    if profile.len() != item.len() {
        return 0.0;
    }

    let denom = item_norm * profile_norm + SIMILARITY_EPSILON;
    profile.dot(&item) / denom
}

/// Render a count with thousands separators, e.g. `1234567` -> `1,234,567`
pub fn format_count(count: usize) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
