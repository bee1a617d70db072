/// Cosine similarity between two vectors.
///
/// Returns a value in `[-1, 1]` where 1 means identical direction. Uses f64
/// intermediate precision and clamps the result to absorb rounding.
///
/// Returns `None` for empty vectors, dimension mismatches and zero-norm
/// inputs, where the similarity is undefined.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.is_empty() || a.len() != b.len() {
        return None;
    }

    let (dot, norm_a, norm_b) = a.iter().zip(b).fold(
        (0.0f64, 0.0f64, 0.0f64),
        |(dot, na, nb), (&x, &y)| {
            let (x, y) = (x as f64, y as f64);
            (dot + x * y, na + x * x, nb + y * y)
        },
    );

    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }

    let similarity = dot / (norm_a.sqrt() * norm_b.sqrt());
    if !similarity.is_finite() {
        return None;
    }
    Some(similarity.clamp(-1.0, 1.0) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical() {
        let v = [0.3, -1.2, 4.5, 0.01];
        assert_eq!(cosine_similarity(&v, &v), Some(1.0));
    }

    #[test]
    fn orthogonal() {
        let s = cosine_similarity(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]).unwrap();
        assert!(s.abs() < 1e-6, "orthogonal: got {s}");
    }

    #[test]
    fn opposite() {
        let s = cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]).unwrap();
        assert!((s + 1.0).abs() < 1e-6, "opposite: got {s}");
    }

    #[test]
    fn scale_invariant() {
        let a = cosine_similarity(&[1.0, 0.5, 0.2], &[0.9, 0.4, 0.3]).unwrap();
        let b = cosine_similarity(&[10.0, 5.0, 2.0], &[0.09, 0.04, 0.03]).unwrap();
        assert!((a - b).abs() < 1e-6);
    }

    #[test]
    fn undefined_cases() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0, 0.0, 0.0]), None);
        assert_eq!(cosine_similarity(&[], &[]), None);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), None);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 0.0]), None);
    }

    #[test]
    fn never_exceeds_one() {
        let v: Vec<f32> = (0..768).map(|i| (i as f32 * 0.37).sin() * 1e3).collect();
        let s = cosine_similarity(&v, &v).unwrap();
        assert!(s <= 1.0);
    }
}
