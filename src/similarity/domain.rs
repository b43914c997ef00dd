//! Similarity capability consumed by the scorer and the test engine.

use crate::common::error::SweatResult;

/// Anything that can compare two terms, e.g. one embedding model or time slice.
///
/// Values are expected roughly in `[-1, 1]`. Unknown terms must fail with
/// [`SweatError::ProviderLookup`](crate::common::SweatError::ProviderLookup) rather
/// than return a placeholder score.
pub trait SimilarityProvider {
    fn similarity(&self, term_a: &str, term_b: &str) -> SweatResult<f64>;

    /// Human readable identifier used in log events.
    fn name(&self) -> &str {
        "model"
    }
}

impl<T: SimilarityProvider + ?Sized> SimilarityProvider for &T {
    fn similarity(&self, term_a: &str, term_b: &str) -> SweatResult<f64> {
        (**self).similarity(term_a, term_b)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: SimilarityProvider + ?Sized> SimilarityProvider for Box<T> {
    fn similarity(&self, term_a: &str, term_b: &str) -> SweatResult<f64> {
        (**self).similarity(term_a, term_b)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
