//! Reference groups and per-term association records.

use serde::Serialize;

use crate::common::error::{SweatError, SweatResult};
use crate::common::stats;

/// The two poles (A and B) that target terms are measured against.
///
/// Immutable once built. Duplicates within a group are allowed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PolarityAxis {
    a: Vec<String>,
    b: Vec<String>,
}

impl PolarityAxis {
    pub fn new<I, J, S, T>(a: I, b: J) -> SweatResult<Self>
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        let a: Vec<String> = a.into_iter().map(Into::into).collect();
        let b: Vec<String> = b.into_iter().map(Into::into).collect();
        if a.is_empty() {
            return Err(SweatError::invalid("reference group A is empty"));
        }
        if b.is_empty() {
            return Err(SweatError::invalid("reference group B is empty"));
        }
        Ok(Self { a, b })
    }

    pub fn a(&self) -> &[String] {
        &self.a
    }

    pub fn b(&self) -> &[String] {
        &self.b
    }
}

/// Raw similarities of one term to every member of A and B, under one model.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TermAssociation {
    pub term: String,
    pub sims_a: Vec<f64>,
    pub sims_b: Vec<f64>,
}

impl TermAssociation {
    pub fn mean_a(&self) -> f64 {
        stats::mean(&self.sims_a)
    }

    pub fn mean_b(&self) -> f64 {
        stats::mean(&self.sims_b)
    }

    /// Association score: mean similarity to A minus mean similarity to B.
    pub fn delta(&self) -> f64 {
        self.mean_a() - self.mean_b()
    }
}

/// Outcome of the single-term paired t-test.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct InnerTest {
    pub statistic: f64,
    pub p_value: f64,
}
