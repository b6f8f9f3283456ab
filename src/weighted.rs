//! Weighted sampling over key-weight pairs.
//!
//! Every positive-weight item gets a key \( u^{1/w} \) where \( u \sim \mathrm{Uniform}(0,1) \)
//! (Efraimidis & Spirakis, 2006). The item with the largest key is a draw with
//! probability exactly \( w_i / \sum_j w_j \); the top-n keys form a weighted sample
//! without replacement.
//!
//! Items with weight `<= 0` are never eligible. They do not count towards the weight
//! sum and are never returned, however many items are requested.
//!
//! Keys are ranked in log space (\( \ln u / w \)), which orders items identically to
//! \( u^{1/w} \) but does not underflow to zero for tiny weights.
//!
//! ## References
//!
//! - Efraimidis & Spirakis (2006): weighted random sampling with a reservoir (A-Res / A-ExpJ).
//!
//! Notes:
//! - The `sample_*` functions take a caller-supplied RNG for deterministic testing.
//! - `weighted_*` functions call `rand::rng()` internally and are not deterministic
//!   across processes.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use rand::prelude::*;
use tracing::{debug, trace};

use crate::error::SampleError;
use crate::weight::Weight;

/// Check every weight and return the sum of the strictly positive ones.
///
/// An empty input is valid and sums to `0.0`.
///
/// # Errors
///
/// - [`SampleError::InvalidWeight`] if a weight is not a finite real number.
/// - [`SampleError::NoPositiveWeight`] if the input is non-empty and no weight is `> 0`.
pub fn validate_weights<'a, K, W, I>(items: I) -> Result<f64, SampleError>
where
    K: 'a,
    W: Weight + ?Sized + 'a,
    I: IntoIterator<Item = (&'a K, &'a W)>,
{
    let mut seen = 0usize;
    let mut positive_sum = 0.0_f64;

    for (_, weight) in items {
        seen += 1;
        let w = weight.as_weight().ok_or_else(|| SampleError::InvalidWeight {
            weight: format!("{weight:?}"),
        })?;
        if w > 0.0 {
            positive_sum += w;
        } else {
            trace!(weight = w, "skipping non-positive weight");
        }
    }

    if seen > 0 && positive_sum <= 0.0 {
        return Err(SampleError::NoPositiveWeight);
    }

    debug!(items = seen, positive_sum, "validated weights");
    Ok(positive_sum)
}

/// Sampling key for one item: `u^(1/weight)` with a fresh `u ~ Uniform(0,1)`.
///
/// Returns `0.0` for `weight <= 0`; any positive weight yields a key in `(0, 1]`
/// (save for underflow with vanishingly small weights).
pub fn sampling_key<R: Rng + ?Sized>(weight: f64, rng: &mut R) -> f64 {
    if weight > 0.0 {
        log_key(weight, rng).exp()
    } else {
        0.0
    }
}

/// `ln(u) / weight`. Caller guarantees `weight > 0`.
#[inline]
fn log_key<R: Rng + ?Sized>(weight: f64, rng: &mut R) -> f64 {
    let u = rng.random::<f64>().max(f64::MIN_POSITIVE);
    u.ln() / weight
}

/// Weights are validated before ranking, so non-numeric values read as ineligible here.
#[inline]
fn positive_weight<W: Weight + ?Sized>(weight: &W) -> Option<f64> {
    weight.as_weight().filter(|&w| w > 0.0)
}

/// Heap entry ordered by key alone.
struct Ranked<'a, K> {
    key: f64,
    item: &'a K,
}

impl<K> PartialEq for Ranked<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        self.key.total_cmp(&other.key) == Ordering::Equal
    }
}

impl<K> Eq for Ranked<'_, K> {}

impl<K> PartialOrd for Ranked<'_, K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for Ranked<'_, K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.total_cmp(&other.key)
    }
}

/// Draw `n` keys with replacement.
///
/// Each draw re-keys every item with fresh randomness and takes the maximum, so
/// draws are independent and repeats are expected. The result has exactly `n`
/// entries, or none if `items` is empty.
///
/// # Errors
///
/// See [`validate_weights`]. An empty input returns `Ok(vec![])` without validation.
#[tracing::instrument(skip_all, fields(n = n))]
pub fn sample_with_replacement<'a, K, W, I, R>(
    items: I,
    n: usize,
    rng: &mut R,
) -> Result<Vec<&'a K>, SampleError>
where
    K: 'a,
    W: Weight + ?Sized + 'a,
    I: IntoIterator<Item = (&'a K, &'a W)>,
    I::IntoIter: Clone,
    R: Rng + ?Sized,
{
    let items = items.into_iter();
    if items.clone().next().is_none() {
        return Ok(Vec::new());
    }
    validate_weights(items.clone())?;

    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let winner = items
            .clone()
            .filter_map(|(key, weight)| {
                positive_weight(weight).map(|w| Ranked {
                    key: log_key(w, rng),
                    item: key,
                })
            })
            .max();
        // Validation guarantees at least one eligible item.
        if let Some(r) = winner {
            out.push(r.item);
        }
    }
    Ok(out)
}

/// Draw up to `n` distinct keys without replacement.
///
/// Each item is keyed once; the `n` largest keys are kept in a bounded min-heap
/// (O(len · log n)). The result holds `min(n, positive-weight items)` keys, ordered
/// by decreasing sampling key.
///
/// # Errors
///
/// See [`validate_weights`]. An empty input returns `Ok(vec![])` without validation.
#[tracing::instrument(skip_all, fields(n = n))]
pub fn sample_without_replacement<'a, K, W, I, R>(
    items: I,
    n: usize,
    rng: &mut R,
) -> Result<Vec<&'a K>, SampleError>
where
    K: 'a,
    W: Weight + ?Sized + 'a,
    I: IntoIterator<Item = (&'a K, &'a W)>,
    I::IntoIter: Clone,
    R: Rng + ?Sized,
{
    let items = items.into_iter();
    if items.clone().next().is_none() {
        return Ok(Vec::new());
    }
    validate_weights(items.clone())?;

    if n == 0 {
        return Ok(Vec::new());
    }

    let mut eligible = 0usize;
    let mut heap: BinaryHeap<Reverse<Ranked<'a, K>>> = BinaryHeap::new();
    for (key, weight) in items {
        let Some(w) = positive_weight(weight) else {
            continue;
        };
        eligible += 1;
        let ranked = Ranked {
            key: log_key(w, rng),
            item: key,
        };

        if heap.len() < n {
            heap.push(Reverse(ranked));
        } else if let Some(mut min) = heap.peek_mut() {
            if ranked > min.0 {
                *min = Reverse(ranked);
            }
        }
    }

    if eligible < n {
        debug!(
            requested = n,
            eligible, "fewer positive-weight items than requested"
        );
    }

    Ok(heap
        .into_sorted_vec()
        .into_iter()
        .map(|Reverse(r)| r.item)
        .collect())
}

/// One weighted draw with replacement, using the thread-local RNG.
///
/// Returns `Ok(None)` for an empty input.
pub fn weighted_choice<'a, K, W, I>(items: I) -> Result<Option<&'a K>, SampleError>
where
    K: 'a,
    W: Weight + ?Sized + 'a,
    I: IntoIterator<Item = (&'a K, &'a W)>,
    I::IntoIter: Clone,
{
    let mut rng = rand::rng();
    Ok(sample_with_replacement(items, 1, &mut rng)?.pop())
}

/// `n` weighted draws with replacement, using the thread-local RNG.
pub fn weighted_choices<'a, K, W, I>(items: I, n: usize) -> Result<Vec<&'a K>, SampleError>
where
    K: 'a,
    W: Weight + ?Sized + 'a,
    I: IntoIterator<Item = (&'a K, &'a W)>,
    I::IntoIter: Clone,
{
    let mut rng = rand::rng();
    sample_with_replacement(items, n, &mut rng)
}

/// One weighted draw without replacement, using the thread-local RNG.
///
/// Returns `Ok(None)` for an empty input.
pub fn weighted_sample<'a, K, W, I>(items: I) -> Result<Option<&'a K>, SampleError>
where
    K: 'a,
    W: Weight + ?Sized + 'a,
    I: IntoIterator<Item = (&'a K, &'a W)>,
    I::IntoIter: Clone,
{
    let mut rng = rand::rng();
    Ok(sample_without_replacement(items, 1, &mut rng)?.pop())
}

/// Up to `n` distinct weighted draws, using the thread-local RNG.
pub fn weighted_samples<'a, K, W, I>(items: I, n: usize) -> Result<Vec<&'a K>, SampleError>
where
    K: 'a,
    W: Weight + ?Sized + 'a,
    I: IntoIterator<Item = (&'a K, &'a W)>,
    I::IntoIter: Clone,
{
    let mut rng = rand::rng();
    sample_without_replacement(items, n, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn pairs<K, W>(v: &[(K, W)]) -> impl Iterator<Item = (&K, &W)> + Clone {
        v.iter().map(|(k, w)| (k, w))
    }

    #[test]
    fn validate_sums_positive_weights_only() {
        let v = [("a", 2.0), ("b", -1.0), ("c", 0.0), ("d", 0.5)];
        assert_eq!(validate_weights(pairs(&v)), Ok(2.5));
    }

    #[test]
    fn validate_accepts_empty() {
        let v: [(&str, f64); 0] = [];
        assert_eq!(validate_weights(pairs(&v)), Ok(0.0));
    }

    #[test]
    fn validate_rejects_all_non_positive() {
        let v = [(1, 0), (2, 0)];
        assert_eq!(
            validate_weights(pairs(&v)),
            Err(SampleError::NoPositiveWeight)
        );
        let v = [(1, -3), (2, 0)];
        assert_eq!(
            validate_weights(pairs(&v)),
            Err(SampleError::NoPositiveWeight)
        );
    }

    #[test]
    fn validate_rejects_non_numeric_and_names_it() {
        let v = [(1, "x"), (2, "y")];
        let err = validate_weights(pairs(&v)).expect_err("strings are not weights");
        assert_eq!(
            err,
            SampleError::InvalidWeight {
                weight: "\"x\"".to_string()
            }
        );
    }

    #[test]
    fn validate_rejects_nan() {
        let v = [("a", 1.0), ("b", f64::NAN)];
        assert!(matches!(
            validate_weights(pairs(&v)),
            Err(SampleError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn sampling_key_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..1_000 {
            let k = sampling_key(2.0, &mut rng);
            assert!(k > 0.0 && k <= 1.0, "key out of range: {k}");
        }
        assert_eq!(sampling_key(0.0, &mut rng), 0.0);
        assert_eq!(sampling_key(-5.0, &mut rng), 0.0);
    }

    #[test]
    fn sampling_key_argmax_is_proportional() {
        // P(argmax = 0) = 3 / (3 + 1) for a single draw.
        let trials = 20_000;
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut wins = 0usize;
        for _ in 0..trials {
            let a = sampling_key(3.0, &mut rng);
            let b = sampling_key(1.0, &mut rng);
            if a > b {
                wins += 1;
            }
        }
        let p = wins as f64 / trials as f64;
        assert!((p - 0.75).abs() < 0.02, "p={p:.4}");
    }

    #[test]
    fn with_replacement_has_exact_length() {
        let v = [("a", 1.0), ("b", 1.0), ("c", 1.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let out = sample_with_replacement(pairs(&v), 10, &mut rng).expect("valid weights");
        assert_eq!(out.len(), 10);
    }

    #[test]
    fn with_replacement_repeats_single_key() {
        let v = [("a", 1)];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let out = sample_with_replacement(pairs(&v), 2, &mut rng).expect("valid weights");
        assert_eq!(out, vec![&"a", &"a"]);
    }

    #[test]
    fn empty_input_is_not_validated() {
        let v: [(&str, &str); 0] = [];
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(sample_with_replacement(pairs(&v), 5, &mut rng), Ok(vec![]));
        assert_eq!(
            sample_without_replacement(pairs(&v), 5, &mut rng),
            Ok(vec![])
        );
    }

    #[test]
    fn without_replacement_caps_at_positive_items() {
        let v = [("_", 9), ("a", 1)];
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut out = sample_without_replacement(pairs(&v), 10, &mut rng).expect("valid weights");
        out.sort();
        assert_eq!(out, vec![&"_", &"a"]);
    }

    #[test]
    fn without_replacement_skips_non_positive() {
        let v = [(1, 0.0), (2, 1.0), (3, -4.0), (4, 2.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..100 {
            let out = sample_without_replacement(pairs(&v), 4, &mut rng).expect("valid weights");
            assert_eq!(out.len(), 2);
            assert!(out.iter().all(|&&k| k == 2 || k == 4));
        }
    }

    #[test]
    fn without_replacement_zero_count_still_validates() {
        let v = [(1, 0), (2, 0)];
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert_eq!(
            sample_without_replacement(pairs(&v), 0, &mut rng),
            Err(SampleError::NoPositiveWeight)
        );
        let v = [(1, 1), (2, 0)];
        assert_eq!(
            sample_without_replacement(pairs(&v), 0, &mut rng),
            Ok(vec![])
        );
    }

    #[test]
    fn tiny_weights_stay_eligible() {
        let v = [(1, 0.0), (2, 1e-300)];
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..50 {
            let out = sample_with_replacement(pairs(&v), 1, &mut rng).expect("valid weights");
            assert_eq!(out, vec![&2]);
        }
    }

    #[test]
    fn without_replacement_biases_toward_large_weights() {
        let v = [(0usize, 100.0), (1, 1.0), (2, 1.0)];
        let mut counts = [0usize; 3];
        for t in 0..2_000 {
            let mut rng = ChaCha8Rng::seed_from_u64(t);
            let out = sample_without_replacement(pairs(&v), 1, &mut rng).expect("valid weights");
            counts[*out[0]] += 1;
        }
        assert!(counts[0] > counts[1]);
        assert!(counts[0] > counts[2]);
    }

    #[test]
    fn thread_rng_wrappers() {
        let v = [("a", -1), ("b", 2)];
        assert_eq!(weighted_choice(pairs(&v)), Ok(Some(&"b")));
        assert_eq!(weighted_sample(pairs(&v)), Ok(Some(&"b")));
        assert_eq!(weighted_choices(pairs(&v), 3), Ok(vec![&"b"; 3]));
        assert_eq!(weighted_samples(pairs(&v), 3), Ok(vec![&"b"]));

        let empty: [(&str, i32); 0] = [];
        assert_eq!(weighted_choice(pairs(&empty)), Ok(None));
        assert_eq!(weighted_sample(pairs(&empty)), Ok(None));
    }
}
