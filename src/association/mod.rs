//! Association scorer: how strongly one term leans toward group A over group B.

pub mod domain;
pub mod service;

pub use domain::{InnerTest, PolarityAxis, TermAssociation};
pub use service::{associate, paired_t_test, score, score_vector, score_with_significance};
