//! `chusen`: weighted random sampling over key-weight maps.
//!
//! Pick one or more keys from a map of `key => weight`, either with replacement
//! (independent draws, repeats allowed) or without replacement (distinct keys),
//! plus plain uniform sampling of pairs.
//!
//! Exposed modules:
//! - `weighted`: exponential-key weighted sampling (Efraimidis–Spirakis).
//! - `uniform`: uniform sampling of pairs without replacement.
//! - `map`: [`WeightMap`], an insertion-ordered map with sampling methods.
//! - `request`: [`SampleRequest`] / [`SampleResult`] and the seeded [`Sampler`].
//!
//! Weights are read through the [`Weight`] trait. Zero and negative weights are
//! ignored; a non-numeric weight, or a non-empty map without any positive weight,
//! is a [`SampleError`]. Empty maps are never an error.
//!
//! ```
//! use chusen::WeightMap;
//!
//! let map: WeightMap<&str, f64> = [("a", 98.0), ("b", 1.0), ("c", 1.0)].into();
//! let key = map.weighted_choice().unwrap();
//! assert!(key.is_some());
//! assert_eq!(map.weighted_choices(5).unwrap().len(), 5);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod map;
pub mod request;
pub mod uniform;
pub mod weight;
pub mod weighted;

pub use error::SampleError;
pub use map::WeightMap;
pub use request::{SampleRequest, SampleResult, Sampler};
pub use weight::Weight;
pub use weighted::{
    sample_with_replacement, sample_without_replacement, sampling_key, validate_weights,
    weighted_choice, weighted_choices, weighted_sample, weighted_samples,
};
