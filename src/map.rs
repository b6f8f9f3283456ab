//! An insertion-ordered key-weight map.

use std::hash::Hash;

use indexmap::IndexMap;
use rand::Rng;

use crate::error::SampleError;
use crate::uniform;
use crate::weight::Weight;
use crate::weighted;

/// An ordered collection of `(key, weight)` pairs with unique keys.
///
/// Inserting an existing key replaces its weight in place (last write wins) and keeps
/// the key's original position. Weights are not checked on insertion; a map may hold
/// zero, negative or non-numeric weights and only fails when a weighted operation runs.
///
/// # Example
///
/// ```
/// use chusen::WeightMap;
///
/// let map: WeightMap<&str, u32> = [("_", 9), ("a", 1)].into();
/// let mut picked = map.weighted_samples(10).unwrap();
/// picked.sort();
/// assert_eq!(picked, vec![&"_", &"a"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightMap<K: Hash + Eq, W> {
    entries: IndexMap<K, W>,
}

impl<K: Hash + Eq, W> Default for WeightMap<K, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, W> WeightMap<K, W> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Create an empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Insert a pair, returning the previous weight if the key was present.
    pub fn insert(&mut self, key: K, weight: W) -> Option<W> {
        self.entries.insert(key, weight)
    }

    /// Weight stored for `key`.
    pub fn get(&self, key: &K) -> Option<&W> {
        self.entries.get(key)
    }

    /// Remove `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &K) -> Option<W> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pairs in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, K, W> {
        self.entries.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, K, W> {
        self.entries.keys()
    }

    pub fn weights(&self) -> indexmap::map::Values<'_, K, W> {
        self.entries.values()
    }

    /// Pair at position `index` in insertion order.
    pub fn get_index(&self, index: usize) -> Option<(&K, &W)> {
        self.entries.get_index(index)
    }

    /// `n` distinct pairs chosen uniformly, using the thread-local RNG.
    ///
    /// See [`uniform::sample`].
    pub fn sample(&self, n: usize) -> Self
    where
        K: Clone,
        W: Clone,
    {
        let mut rng = rand::rng();
        uniform::sample(self, n, &mut rng)
    }

    /// [`sample`](Self::sample) with a caller-supplied RNG.
    pub fn sample_with_rng<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Self
    where
        K: Clone,
        W: Clone,
    {
        uniform::sample(self, n, rng)
    }
}

impl<K: Hash + Eq, W: Weight> WeightMap<K, W> {
    /// One weighted draw with replacement; `None` if the map is empty.
    pub fn weighted_choice(&self) -> Result<Option<&K>, SampleError> {
        weighted::weighted_choice(self)
    }

    /// [`weighted_choice`](Self::weighted_choice) with a caller-supplied RNG.
    pub fn weighted_choice_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Option<&K>, SampleError> {
        Ok(weighted::sample_with_replacement(self, 1, rng)?.pop())
    }

    /// `n` weighted draws with replacement. Keys may repeat.
    pub fn weighted_choices(&self, n: usize) -> Result<Vec<&K>, SampleError> {
        weighted::weighted_choices(self, n)
    }

    /// [`weighted_choices`](Self::weighted_choices) with a caller-supplied RNG.
    pub fn weighted_choices_with_rng<R: Rng + ?Sized>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<&K>, SampleError> {
        weighted::sample_with_replacement(self, n, rng)
    }

    /// One weighted draw without replacement; `None` if the map is empty.
    pub fn weighted_sample(&self) -> Result<Option<&K>, SampleError> {
        weighted::weighted_sample(self)
    }

    /// [`weighted_sample`](Self::weighted_sample) with a caller-supplied RNG.
    pub fn weighted_sample_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Option<&K>, SampleError> {
        Ok(weighted::sample_without_replacement(self, 1, rng)?.pop())
    }

    /// Up to `n` distinct keys, drawn by weight. Non-positive weights are never picked.
    pub fn weighted_samples(&self, n: usize) -> Result<Vec<&K>, SampleError> {
        weighted::weighted_samples(self, n)
    }

    /// [`weighted_samples`](Self::weighted_samples) with a caller-supplied RNG.
    pub fn weighted_samples_with_rng<R: Rng + ?Sized>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<&K>, SampleError> {
        weighted::sample_without_replacement(self, n, rng)
    }
}

impl<'a, K: Hash + Eq, W> IntoIterator for &'a WeightMap<K, W> {
    type Item = (&'a K, &'a W);
    type IntoIter = indexmap::map::Iter<'a, K, W>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Hash + Eq, W> IntoIterator for WeightMap<K, W> {
    type Item = (K, W);
    type IntoIter = indexmap::map::IntoIter<K, W>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Hash + Eq, W> FromIterator<(K, W)> for WeightMap<K, W> {
    fn from_iter<I: IntoIterator<Item = (K, W)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<K: Hash + Eq, W> Extend<(K, W)> for WeightMap<K, W> {
    fn extend<I: IntoIterator<Item = (K, W)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl<K: Hash + Eq, W, const N: usize> From<[(K, W); N]> for WeightMap<K, W> {
    fn from(pairs: [(K, W); N]) -> Self {
        pairs.into_iter().collect()
    }
}
