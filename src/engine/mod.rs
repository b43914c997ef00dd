//! Paired test engine for association drift between two models.
//!
//! TODO: Stream null samples straight into the tail counter when callers do not need `null_samples`.

pub mod domain;
pub mod permutation;
pub mod service;

pub use domain::{
    DegeneratePolicy, Neutrality, ResultRecord, Sampling, Tail, TestOutcome, TestParams,
};
pub use service::{evaluate, run, run_configured, run_seeded, Sweat};
