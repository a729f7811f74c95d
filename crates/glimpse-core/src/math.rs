//! Shared vector math.
//!
//! Components are stored as `f32`; sums are accumulated in `f64` so that
//! very small or very large components neither underflow nor overflow.

/// Inner product of two equal-length vectors.
pub fn dot(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| f64::from(x) * f64::from(y))
        .sum()
}

/// Euclidean (L2) magnitude of a vector. Empty vectors have norm 0.
pub fn l2_norm(v: &[f32]) -> f64 {
    v.iter()
        .map(|&x| f64::from(x) * f64::from(x))
        .sum::<f64>()
        .sqrt()
}

/// Cosine similarity given the dot product and both norms.
///
/// Returns 0.0 when either norm is zero.
pub fn cosine_from_parts(dot: f64, norm_a: f64, norm_b: f64) -> f32 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let sim = dot / (norm_a * norm_b);
    if sim.is_finite() {
        sim.clamp(-1.0, 1.0) as f32
    } else {
        0.0
    }
}

/// Cosine similarity of two vectors: `dot(a, b) / (|a| * |b|)`.
///
/// No mean-centering is applied.
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    cosine_from_parts(dot(a, b), l2_norm(a), l2_norm(b))
}
