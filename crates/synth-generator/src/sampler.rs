//! Portable sampling primitives.
//!
//! Every draw is derived from `RngCore::next_u64` through [`unit`], and every
//! selection rule is spelled out here instead of delegating to `rand`'s
//! distributions. Given the same sequence of `u64` values, any implementation
//! following these rules selects the same items.
//!
//! - unit float: `(x >> 11) * 2^-53`, in `[0, 1)`
//! - uniform integer in `[lo, hi]`: `lo + floor(unit * (hi - lo + 1))`, clamped to `hi`
//! - weighted draw: prefix sums in list order, `target = unit * total`, first
//!   index whose prefix sum is strictly greater than `target`
//! - Bernoulli(p): `unit < p`
//! - k of n without replacement: partial Fisher-Yates, swapping `i` with
//!   `uniform(i, n - 1)` for `i in 0..k`

use crate::error::GeneratorError;
use rand::RngCore;

const UNIT_SCALE: f64 = 1.0 / (1u64 << 53) as f64;

/// Uniform float in `[0, 1)` from the top 53 bits of one `u64`.
pub fn unit<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    (rng.next_u64() >> 11) as f64 * UNIT_SCALE
}

/// Uniform integer in the inclusive range `[lo, hi]`.
///
/// Consumes exactly one `u64`, including when `lo == hi`.
pub fn uniform_int<R: RngCore + ?Sized>(rng: &mut R, lo: u32, hi: u32) -> u32 {
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    let span = u64::from(hi - lo) + 1;
    let offset = (unit(rng) * span as f64) as u64;
    lo + offset.min(span - 1) as u32
}

/// Uniform index in `[lo, hi]` over `usize`.
fn uniform_index<R: RngCore + ?Sized>(rng: &mut R, lo: usize, hi: usize) -> usize {
    let span = (hi - lo) as u64 + 1;
    let offset = (unit(rng) * span as f64) as u64;
    lo + offset.min(span - 1) as usize
}

/// `true` with probability `p`.
pub fn bernoulli<R: RngCore + ?Sized>(rng: &mut R, p: f64) -> bool {
    unit(rng) < p
}

/// Draw an index with probability proportional to its weight.
///
/// Zero-weight entries are never selected. Fails if the table is empty,
/// holds a negative or non-finite weight, or sums to zero.
pub fn weighted_index<R: RngCore + ?Sized>(
    rng: &mut R,
    weights: &[f64],
) -> Result<usize, GeneratorError> {
    let mut cumulative = Vec::with_capacity(weights.len());
    let mut total = 0.0f64;
    for &weight in weights {
        if !weight.is_finite() || weight < 0.0 {
            return Err(GeneratorError::InvalidDistribution(format!(
                "weight {weight} must be finite and non-negative"
            )));
        }
        total += weight;
        cumulative.push(total);
    }
    if cumulative.is_empty() {
        return Err(GeneratorError::InvalidDistribution(
            "weight table is empty".to_string(),
        ));
    }
    if total <= 0.0 {
        return Err(GeneratorError::InvalidDistribution(
            "weights sum to zero".to_string(),
        ));
    }

    let target = unit(rng) * total;
    let index = cumulative.partition_point(|&sum| sum <= target);
    if index < weights.len() {
        return Ok(index);
    }
    // Rounding pushed target onto the total: take the last selectable entry.
    Ok(weights.iter().rposition(|&w| w > 0.0).unwrap_or(0))
}

/// Draw one item from `(item, weight)` pairs.
pub fn choose_weighted<'a, R, T>(
    rng: &mut R,
    table: &'a [(T, f64)],
) -> Result<&'a T, GeneratorError>
where
    R: RngCore + ?Sized,
{
    let weights: Vec<f64> = table.iter().map(|(_, w)| *w).collect();
    let index = weighted_index(rng, &weights)?;
    Ok(&table[index].0)
}

/// Draw one item uniformly.
pub fn choose<'a, R, T>(rng: &mut R, pool: &'a [T], name: &str) -> Result<&'a T, GeneratorError>
where
    R: RngCore + ?Sized,
{
    if pool.is_empty() {
        return Err(GeneratorError::EmptyPool(name.to_string()));
    }
    Ok(&pool[uniform_index(rng, 0, pool.len() - 1)])
}

/// Draw `k` distinct items without replacement, in draw order.
///
/// `k` larger than the pool is clamped to the pool size.
pub fn sample_distinct<R, T>(rng: &mut R, pool: &[T], k: usize) -> Vec<T>
where
    R: RngCore + ?Sized,
    T: Clone,
{
    let n = pool.len();
    let k = k.min(n);
    let mut indices: Vec<usize> = (0..n).collect();
    for i in 0..k {
        let j = uniform_index(rng, i, n - 1);
        indices.swap(i, j);
    }
    indices[..k].iter().map(|&i| pool[i].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{unit_to_u64, ScriptedRng};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn test_unit_bounds() {
        let mut rng = ScriptedRng::new(vec![0, u64::MAX]);
        assert_eq!(unit(&mut rng), 0.0);
        let top = unit(&mut rng);
        assert!(top < 1.0);
        assert!(top > 0.999_999);
    }

    #[test]
    fn test_weighted_index_follows_prefix_sums() {
        // prefix sums: 1, 3, 6 over total 6
        let weights = [1.0, 2.0, 3.0];
        let cases = [(0.0, 0), (0.16, 0), (0.17, 1), (0.49, 1), (0.5, 2), (0.99, 2)];
        for (u, expected) in cases {
            let mut rng = ScriptedRng::units(&[u]);
            assert_eq!(weighted_index(&mut rng, &weights).unwrap(), expected, "unit {u}");
        }
    }

    #[test]
    fn test_weighted_index_boundary_goes_to_next_bucket() {
        // target == prefix sum of the first entry selects the second entry
        let mut rng = ScriptedRng::units(&[0.5]);
        assert_eq!(weighted_index(&mut rng, &[1.0, 1.0]).unwrap(), 1);
    }

    #[test]
    fn test_weighted_index_skips_zero_weights() {
        let weights = [0.0, 1.0, 0.0, 1.0, 0.0];
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let index = weighted_index(&mut rng, &weights).unwrap();
            assert!(index == 1 || index == 3);
        }
        let mut rng = ScriptedRng::new(vec![u64::MAX]);
        assert_eq!(weighted_index(&mut rng, &weights).unwrap(), 3);
    }

    #[test]
    fn test_weighted_index_rejects_bad_tables() {
        let mut rng = ScriptedRng::units(&[0.5]);
        assert!(matches!(
            weighted_index(&mut rng, &[]),
            Err(GeneratorError::InvalidDistribution(_))
        ));
        assert!(matches!(
            weighted_index(&mut rng, &[0.0, 0.0]),
            Err(GeneratorError::InvalidDistribution(_))
        ));
        assert!(matches!(
            weighted_index(&mut rng, &[1.0, -0.5]),
            Err(GeneratorError::InvalidDistribution(_))
        ));
        assert!(matches!(
            weighted_index(&mut rng, &[f64::NAN]),
            Err(GeneratorError::InvalidDistribution(_))
        ));
    }

    #[test]
    fn test_weighted_frequencies_converge() {
        let weights = [62.0, 22.8, 8.4];
        let total: f64 = weights.iter().sum();
        let mut counts = [0usize; 3];
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let n = 50_000;
        for _ in 0..n {
            counts[weighted_index(&mut rng, &weights).unwrap()] += 1;
        }
        for (count, weight) in counts.iter().zip(weights) {
            let actual = *count as f64 / n as f64;
            assert!((actual - weight / total).abs() < 0.01);
        }
    }

    #[test]
    fn test_uniform_int_range() {
        let mut rng = ScriptedRng::units(&[0.0, 0.999_999, 0.5]);
        assert_eq!(uniform_int(&mut rng, 2, 4), 2);
        assert_eq!(uniform_int(&mut rng, 2, 4), 4);
        assert_eq!(uniform_int(&mut rng, 2, 4), 3);

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let seen: HashSet<u32> = (0..500).map(|_| uniform_int(&mut rng, 22, 30)).collect();
        assert_eq!(seen.len(), 9);
        assert!(seen.iter().all(|v| (22..=30).contains(v)));
    }

    #[test]
    fn test_uniform_int_single_value_consumes_draw() {
        let mut rng = ScriptedRng::new(vec![unit_to_u64(0.9), unit_to_u64(0.1)]);
        assert_eq!(uniform_int(&mut rng, 5, 5), 5);
        assert_eq!(rng.position(), 1);
    }

    #[test]
    fn test_bernoulli_is_strict() {
        let mut rng = ScriptedRng::units(&[0.5, 0.25]);
        assert!(!bernoulli(&mut rng, 0.5));
        assert!(bernoulli(&mut rng, 0.5));
    }

    #[test]
    fn test_choose_empty_pool() {
        let mut rng = ScriptedRng::units(&[0.5]);
        let pool: Vec<String> = Vec::new();
        assert!(matches!(
            choose(&mut rng, &pool, "names"),
            Err(GeneratorError::EmptyPool(name)) if name == "names"
        ));
    }

    #[test]
    fn test_sample_distinct_partial_fisher_yates() {
        let pool = ["a", "b", "c", "d"];
        // i=0: uniform(0,3) with 0.75 -> 3; i=1: uniform(1,3) with 0.0 -> 1
        let mut rng = ScriptedRng::units(&[0.75, 0.0]);
        assert_eq!(sample_distinct(&mut rng, &pool, 2), vec!["d", "b"]);
    }

    #[test]
    fn test_sample_distinct_has_no_duplicates() {
        let pool: Vec<u32> = (0..19).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for k in 0..=25 {
            let sample = sample_distinct(&mut rng, &pool, k);
            assert_eq!(sample.len(), k.min(pool.len()));
            let unique: HashSet<_> = sample.iter().collect();
            assert_eq!(unique.len(), sample.len());
        }
    }
}
