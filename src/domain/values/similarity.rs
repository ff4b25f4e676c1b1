/// Cosine similarity of two equal-length vectors, accumulated in f64.
///
/// Returns 0.0 when the lengths differ, when either vector is empty, or when
/// either has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let x = *x as f64;
        let y = *y as f64;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 { 0.0 } else { dot / denom }
}

/// Sorts `(sequence, score)` hits by descending score, then ascending
/// sequence, and keeps the first `k`. A NaN score ranks below every number.
pub fn rank<T>(mut hits: Vec<(u64, f64, T)>, k: usize) -> Vec<(u64, f64, T)> {
    for hit in hits.iter_mut() {
        if hit.1.is_nan() {
            hit.1 = f64::NEG_INFINITY;
        }
    }
    hits.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    hits.truncate(k);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors_score_one() {
        let sim = cosine_similarity(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]);
        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_orthogonal_vectors_score_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_diagonal_scores_between() {
        let sim = cosine_similarity(&[1.0, 0.0], &[1.0, 1.0]);
        assert!((sim - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
    }

    #[test]
    fn test_zero_norm_scores_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_length_mismatch_scores_zero() {
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_rank_puts_nan_last() {
        let hits = vec![(0, 0.0, "low"), (1, f64::NAN, "bad"), (2, 1.0, "best"), (3, 0.7, "mid")];
        let ranked: Vec<&str> = rank(hits, 4).into_iter().map(|h| h.2).collect();
        assert_eq!(ranked, vec!["best", "mid", "low", "bad"]);
    }

    #[test]
    fn test_rank_breaks_ties_by_sequence() {
        let hits = vec![(3, 0.5, "c"), (1, 0.5, "a"), (2, 0.9, "b"), (0, 0.1, "z")];
        let ranked: Vec<&str> = rank(hits, 3).into_iter().map(|h| h.2).collect();
        assert_eq!(ranked, vec!["b", "a", "c"]);
    }
}
