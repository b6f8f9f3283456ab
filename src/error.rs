//! Errors for weighted sampling.

/// Error type for all fallible sampling operations.
///
/// An empty map is never an error; every operation defines an empty result for it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SampleError {
    /// A weight could not be read as a finite real number.
    #[error("invalid weight: {weight}; all weights must be numeric")]
    InvalidWeight {
        /// Debug rendering of the offending weight.
        weight: String,
    },

    /// The map is non-empty but no weight is strictly positive.
    #[error("at least one weight must be > 0")]
    NoPositiveWeight,
}
