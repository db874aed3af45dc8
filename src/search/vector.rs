//! Plain `f32` vector math used by the ranker.
//!
//! Norms are accumulated in `f64` so large finite components do not
//! overflow.

fn norm_f64(v: &[f32]) -> f64 {
    v.iter().map(|&x| (x as f64) * (x as f64)).sum::<f64>().sqrt()
}

/// Euclidean length of a vector
pub fn l2_norm(v: &[f32]) -> f32 {
    norm_f64(v) as f32
}

/// Scale a vector to unit length
///
/// A zero (or non-finite) norm yields an all-zero vector of the same
/// length, so any dot product against it is exactly 0.
pub fn normalize(v: &[f32]) -> Vec<f32> {
    let norm = norm_f64(v);
    if norm > 0.0 && norm.is_finite() {
        v.iter().map(|&x| (x as f64 / norm) as f32).collect()
    } else {
        vec![0.0; v.len()]
    }
}

/// Dot product of two vectors of equal length
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
