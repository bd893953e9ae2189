use thiserror::Error;

/// Errors from similarity scoring.
///
/// Both variants are defensive: the encoder emits fixed-dimension, non-zero
/// vectors in practice, so hitting either means an upstream bug rather than
/// bad user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreError {
    #[error("embedding dimensions differ: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("zero-magnitude embedding cannot be scored")]
    DegenerateVector,
}

/// Cosine similarity between two embedding vectors.
///
/// Returns dot(A,B) / (|A|*|B|), symmetric in its arguments. Fails with a
/// domain error instead of panicking on a zero-magnitude vector.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, ScoreError> {
    if a.len() != b.len() {
        return Err(ScoreError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(ScoreError::DegenerateVector);
    }

    Ok(dot / (norm_a * norm_b))
}

/// Rescale a similarity score to a display percentage.
///
/// round(score * 100, 1), clamped to [0, 100]. The clamp is a no-op for the
/// similarity range the encoder actually produces.
pub fn confidence(score: f32) -> f64 {
    ((score as f64 * 1000.0).round() / 10.0).clamp(0.0, 100.0)
}
