//! Weighted draws from a map: with replacement, without replacement, and uniform.
//!
//! With replacement every draw is independent, so heavy keys repeat. Without
//! replacement each key appears at most once and keys with weight <= 0 never do.
//!
//! Run with `RUST_LOG=chusen=debug` to see validation and truncation events.

use chusen::{SampleRequest, Sampler, WeightMap};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chusen=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Many small weights, few big ones, and two keys that can never be drawn.
    let mut map: WeightMap<String, f64> = (0..10)
        .map(|i| (format!("k{i}"), 1.0 / (1.0 + i as f64).powf(1.3)))
        .collect();
    map.insert("zero".to_string(), 0.0);
    map.insert("negative".to_string(), -2.0);

    let mut sampler = Sampler::with_seed(7);

    let choices = sampler.weighted_choices(&map, 10)?;
    let samples = sampler.weighted_samples(&map, 20)?;
    let single = sampler.draw(&map, &SampleRequest::new())?;
    let uniform = sampler.sample(&map, 3);

    println!("weights:");
    for (k, w) in &map {
        println!("  {k:>8}  w={w:.6}");
    }
    println!();
    println!("with replacement (10):     {choices:?}");
    println!("without replacement (20):  {samples:?}  ({} eligible)", samples.len());
    println!("single draw:               {single:?}");
    println!("uniform pairs (3):         {:?}", uniform.keys().collect::<Vec<_>>());

    Ok(())
}
