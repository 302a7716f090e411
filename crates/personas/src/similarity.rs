//! Vector scoring for persona lookup.
//!
//! Catalog and query embeddings come from the same model and are unit
//! length, so the dot product stands in for cosine similarity.

use crate::error::MatchError;

/// Dot product of two equal-length vectors.
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Score `query` against every candidate and return the index and score
/// of the best one. On an exact tie the earliest candidate wins.
pub fn best_match<'a, I>(query: &[f32], candidates: I) -> Result<(usize, f32), MatchError>
where
    I: IntoIterator<Item = (&'a str, &'a [f32])>,
{
    if query.is_empty() {
        return Err(MatchError::EmptyEmbedding);
    }

    let mut best: Option<(usize, f32)> = None;
    for (i, (key, emb)) in candidates.into_iter().enumerate() {
        if emb.len() != query.len() {
            return Err(MatchError::DimensionMismatch {
                key: key.to_string(),
                query: query.len(),
                persona: emb.len(),
            });
        }
        let score = dot(query, emb);
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((i, score)),
        }
    }

    best.ok_or(MatchError::EmptyCatalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_of_unit_vectors() {
        assert_eq!(dot(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert!((dot(&[0.6, 0.8], &[0.6, 0.8]) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn best_match_picks_highest() {
        let a = [1.0, 0.0];
        let b = [0.0, 1.0];
        let (idx, score) = best_match(&[0.1, 0.9], [("a", &a[..]), ("b", &b[..])]).unwrap();
        assert_eq!(idx, 1);
        assert!((score - 0.9).abs() < 1e-6);
    }

    #[test]
    fn tie_goes_to_first_candidate() {
        let a = [0.5, 0.5];
        let b = [0.5, 0.5];
        let (idx, _) = best_match(&[1.0, 1.0], [("a", &a[..]), ("b", &b[..])]).unwrap();
        assert_eq!(idx, 0);
    }

    #[test]
    fn negative_scores_still_match() {
        let a = [-1.0, 0.0];
        let (idx, score) = best_match(&[1.0, 0.0], [("a", &a[..])]).unwrap();
        assert_eq!(idx, 0);
        assert_eq!(score, -1.0);
    }

    #[test]
    fn errors_are_typed() {
        let a = [1.0, 0.0, 0.0];
        assert!(matches!(
            best_match(&[1.0, 0.0], [("a", &a[..])]),
            Err(MatchError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            best_match(&[1.0], std::iter::empty()),
            Err(MatchError::EmptyCatalog)
        ));
        assert!(matches!(
            best_match(&[], [("a", &a[..])]),
            Err(MatchError::EmptyEmbedding)
        ));
    }
}
