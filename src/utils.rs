//! Small shared helpers.

use rand::{SeedableRng, rngs::StdRng};

/// Construct a `StdRng`, seeded for reproducibility when a seed is given.
pub fn build_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(value) => StdRng::seed_from_u64(value),
        None => StdRng::seed_from_u64(rand::random::<u64>()),
    }
}

/// Arithmetic mean, 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn test_build_rng_seeded_is_deterministic() {
        let mut a = build_rng(Some(42));
        let mut b = build_rng(Some(42));
        assert_eq!(a.random::<u64>(), b.random::<u64>());
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[2.0, 4.0]), 3.0);
    }
}
