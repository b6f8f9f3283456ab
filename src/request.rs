//! Sample requests and a seeded sampler.
//!
//! A [`SampleRequest`] that never had its count set asks for one key and yields
//! [`SampleResult::One`]; setting a count, even to 1, yields [`SampleResult::Many`].

use std::hash::Hash;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::SampleError;
use crate::map::WeightMap;
use crate::uniform;
use crate::weight::Weight;
use crate::weighted;

/// What to draw from a map.
///
/// # Example
///
/// ```
/// use chusen::SampleRequest;
///
/// let req = SampleRequest::new().with_count(3).with_replacement(true);
/// assert_eq!(req.count(), Some(3));
/// assert!(req.replacement());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleRequest {
    /// Number of keys; `None` means a single bare key.
    count: Option<usize>,
    /// Whether keys may repeat.
    replacement: bool,
}

impl SampleRequest {
    /// A single draw without replacement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of keys to draw.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    /// Sets whether keys may repeat.
    pub fn with_replacement(mut self, replacement: bool) -> Self {
        self.replacement = replacement;
        self
    }

    /// The explicit count, if one was set.
    pub fn count(&self) -> Option<usize> {
        self.count
    }

    /// Number of keys requested: the explicit count, or 1.
    pub fn effective_count(&self) -> usize {
        self.count.unwrap_or(1)
    }

    pub fn replacement(&self) -> bool {
        self.replacement
    }
}

/// Keys produced by a [`SampleRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleResult<K> {
    /// No count was requested: one key, or `None` for an empty map.
    One(Option<K>),
    /// A count was requested: possibly empty, never absent.
    Many(Vec<K>),
}

impl<K> SampleResult<K> {
    pub fn len(&self) -> usize {
        match self {
            Self::One(k) => usize::from(k.is_some()),
            Self::Many(ks) => ks.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into a vector regardless of shape.
    pub fn into_vec(self) -> Vec<K> {
        match self {
            Self::One(k) => k.into_iter().collect(),
            Self::Many(ks) => ks,
        }
    }
}

/// A sampler owning its random source.
///
/// Two samplers built with the same seed produce the same sequence of results for
/// the same sequence of calls.
#[derive(Debug, Clone)]
pub struct Sampler {
    rng: StdRng,
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler {
    /// A sampler seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// A reproducible sampler.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw keys from `map` as described by `request`.
    #[tracing::instrument(skip_all, fields(count = ?request.count(), replacement = request.replacement()))]
    pub fn draw<'a, K, W>(
        &mut self,
        map: &'a WeightMap<K, W>,
        request: &SampleRequest,
    ) -> Result<SampleResult<&'a K>, SampleError>
    where
        K: Hash + Eq,
        W: Weight,
    {
        let n = request.effective_count();
        let mut keys = if request.replacement() {
            weighted::sample_with_replacement(map, n, &mut self.rng)?
        } else {
            weighted::sample_without_replacement(map, n, &mut self.rng)?
        };
        Ok(match request.count() {
            Some(_) => SampleResult::Many(keys),
            None => SampleResult::One(keys.pop()),
        })
    }

    /// `n` distinct pairs chosen uniformly; see [`uniform::sample`].
    pub fn sample<K, W>(&mut self, map: &WeightMap<K, W>, n: usize) -> WeightMap<K, W>
    where
        K: Hash + Eq + Clone,
        W: Clone,
    {
        uniform::sample(map, n, &mut self.rng)
    }

    /// One weighted draw with replacement.
    pub fn weighted_choice<'a, K, W>(
        &mut self,
        map: &'a WeightMap<K, W>,
    ) -> Result<Option<&'a K>, SampleError>
    where
        K: Hash + Eq,
        W: Weight,
    {
        map.weighted_choice_with_rng(&mut self.rng)
    }

    /// `n` weighted draws with replacement.
    pub fn weighted_choices<'a, K, W>(
        &mut self,
        map: &'a WeightMap<K, W>,
        n: usize,
    ) -> Result<Vec<&'a K>, SampleError>
    where
        K: Hash + Eq,
        W: Weight,
    {
        map.weighted_choices_with_rng(n, &mut self.rng)
    }

    /// One weighted draw without replacement.
    pub fn weighted_sample<'a, K, W>(
        &mut self,
        map: &'a WeightMap<K, W>,
    ) -> Result<Option<&'a K>, SampleError>
    where
        K: Hash + Eq,
        W: Weight,
    {
        map.weighted_sample_with_rng(&mut self.rng)
    }

    /// Up to `n` distinct weighted draws.
    pub fn weighted_samples<'a, K, W>(
        &mut self,
        map: &'a WeightMap<K, W>,
        n: usize,
    ) -> Result<Vec<&'a K>, SampleError>
    where
        K: Hash + Eq,
        W: Weight,
    {
        map.weighted_samples_with_rng(n, &mut self.rng)
    }
}
