//! Records consumed by chart renderers.

use serde::Serialize;

/// Which pole a term leans toward under one model.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Direction {
    TowardA,
    TowardB,
    /// The term's own paired test did not clear the requested threshold.
    NotSignificant,
}

/// One target term under one model: raw similarities plus summary.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TermDetail {
    pub term: String,
    pub sims_a: Vec<f64>,
    pub sims_b: Vec<f64>,
    pub mean_a: f64,
    pub mean_b: f64,
    pub delta: f64,
    pub inner_p_value: Option<f64>,
    pub direction: Direction,
}

/// Positive and negative parts of one model's per-term deltas.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CumulativeAssociation {
    pub model: String,
    pub deltas: Vec<f64>,
    pub positive: f64,
    pub negative: f64,
    pub cumulative: f64,
}
