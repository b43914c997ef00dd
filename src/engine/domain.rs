//! Parameters and result records of the paired drift test.

use serde::Serialize;

use crate::common::config::DEFAULT_PERMUTATIONS;
use crate::common::error::{SweatError, SweatResult};
use crate::common::stats::round_to;

/// Decimal places used for the display record.
pub const RECORD_DECIMALS: i32 = 4;

/// Sum of a score vector below which a model counts as net-neutral.
pub const NEUTRAL_THRESHOLD: f64 = 1e-3;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub enum Tail {
    /// Extremeness judged by absolute value.
    #[default]
    TwoTailed,
    /// Extremeness judged in the direction of the observed statistic.
    OneTailed,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub enum Sampling {
    /// Same target terms scored under both models.
    #[default]
    Paired,
    /// Separate target sets per model. Not implemented.
    Independent,
}

/// What to do when both score vectors have zero spread and equal means.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub enum DegeneratePolicy {
    /// Report an effect size of `0.0` and flag the outcome.
    #[default]
    Zero,
    /// Fail with `DegenerateInput`.
    Reject,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct TestParams {
    pub permutations: usize,
    pub tail: Tail,
    pub sampling: Sampling,
    pub degenerate: DegeneratePolicy,
    /// Spread permutation trials over the rayon pool.
    pub parallel: bool,
}

impl Default for TestParams {
    fn default() -> Self {
        Self {
            permutations: DEFAULT_PERMUTATIONS,
            tail: Tail::default(),
            sampling: Sampling::default(),
            degenerate: DegeneratePolicy::default(),
            parallel: false,
        }
    }
}

impl TestParams {
    pub fn with_permutations(mut self, permutations: usize) -> Self {
        self.permutations = permutations;
        self
    }

    pub fn with_tail(mut self, tail: Tail) -> Self {
        self.tail = tail;
        self
    }

    pub fn with_sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn with_degenerate(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate = policy;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> SweatResult<()> {
        if self.permutations == 0 {
            return Err(SweatError::invalid("permutation count must be positive"));
        }
        Ok(())
    }
}

/// Display record, rounded to [`RECORD_DECIMALS`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct ResultRecord {
    pub score: f64,
    #[serde(rename = "eff_size")]
    pub effect_size: f64,
    #[serde(rename = "p-val")]
    pub p_value: f64,
}

/// Net-neutral flags per model.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Neutrality {
    pub model_1: bool,
    pub model_2: bool,
}

/// Full-precision outcome of one test invocation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TestOutcome {
    pub score: f64,
    pub effect_size: f64,
    pub p_value: f64,
    pub scores_1: Vec<f64>,
    pub scores_2: Vec<f64>,
    /// Candidate statistics of every permutation, in trial order.
    pub null_samples: Vec<f64>,
    pub neutral: Neutrality,
    /// Zero spread with equal means; `effect_size` came from the policy.
    pub degenerate: bool,
}

impl TestOutcome {
    pub fn record(&self) -> ResultRecord {
        ResultRecord {
            score: round_to(self.score, RECORD_DECIMALS),
            effect_size: round_to(self.effect_size, RECORD_DECIMALS),
            p_value: round_to(self.p_value, RECORD_DECIMALS),
        }
    }
}
