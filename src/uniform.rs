//! Uniform sampling of pairs without replacement.

use std::hash::Hash;

use rand::seq::index;
use rand::Rng;
use tracing::trace;

use crate::map::WeightMap;

/// Choose `n` distinct pairs uniformly at random; weights are ignored.
///
/// If `n >= map.len()` the whole map is returned: no key is ever lost to bad luck.
/// Otherwise every subset of size `n` is equally likely. Selected pairs keep their
/// relative order from `map`.
pub fn sample<K, W, R>(map: &WeightMap<K, W>, n: usize, rng: &mut R) -> WeightMap<K, W>
where
    K: Hash + Eq + Clone,
    W: Clone,
    R: Rng + ?Sized,
{
    let len = map.len();
    if n >= len {
        trace!(n, len, "sample covers the whole map");
        return map.clone();
    }

    let mut picked = index::sample(rng, len, n).into_vec();
    picked.sort_unstable();

    let mut out = WeightMap::with_capacity(n);
    for i in picked {
        if let Some((k, w)) = map.get_index(i) {
            out.insert(k.clone(), w.clone());
        }
    }
    out
}
