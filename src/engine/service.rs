//! Paired drift test: score both models, build the permutation null, derive
//! significance and effect size.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::association::{self, PolarityAxis};
use crate::common::error::{SweatCode, SweatError, SweatResult};
use crate::common::config::SweatCfg;
use crate::common::{stats, time};
use crate::report::{self, CumulativeAssociation, Labels, TermDetail};
use crate::similarity::SimilarityProvider;

use super::domain::{
    DegeneratePolicy, Neutrality, Sampling, TestOutcome, TestParams, NEUTRAL_THRESHOLD,
};
use super::permutation;

/// Score `terms` under both models and run the permutation test.
pub fn run<M1, M2, S, R>(
    model_1: &M1,
    model_2: &M2,
    terms: &[S],
    axis: &PolarityAxis,
    params: &TestParams,
    rng: &mut R,
) -> SweatResult<TestOutcome>
where
    M1: SimilarityProvider + ?Sized,
    M2: SimilarityProvider + ?Sized,
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    params.validate()?;
    if params.sampling == Sampling::Independent {
        return Err(SweatError::not_implemented("independent-samples drift test"));
    }
    if terms.is_empty() {
        return Err(SweatError::invalid("target term list is empty"));
    }

    debug!(
        ev = "sweat_score",
        model_1 = model_1.name(),
        model_2 = model_2.name(),
        terms = terms.len(),
    );
    let scores_1 = association::score_vector(model_1, axis, terms)?;
    let scores_2 = association::score_vector(model_2, axis, terms)?;

    evaluate(scores_1, scores_2, params, rng)
}

/// [`run`] with a `ChaCha8Rng` seeded from `seed`.
pub fn run_seeded<M1, M2, S>(
    model_1: &M1,
    model_2: &M2,
    terms: &[S],
    axis: &PolarityAxis,
    params: &TestParams,
    seed: u64,
) -> SweatResult<TestOutcome>
where
    M1: SimilarityProvider + ?Sized,
    M2: SimilarityProvider + ?Sized,
    S: AsRef<str>,
{
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    run(model_1, model_2, terms, axis, params, &mut rng)
}

/// [`run`] driven by a configuration snapshot. `SWEAT_SEED` pins the
/// permutation draws; without it the thread-local generator is used.
pub fn run_configured<M1, M2, S>(
    model_1: &M1,
    model_2: &M2,
    terms: &[S],
    axis: &PolarityAxis,
    cfg: &SweatCfg,
) -> SweatResult<TestOutcome>
where
    M1: SimilarityProvider + ?Sized,
    M2: SimilarityProvider + ?Sized,
    S: AsRef<str>,
{
    let params = cfg.test_params();
    match cfg.seed {
        Some(seed) => run_seeded(model_1, model_2, terms, axis, &params, seed),
        None => run(model_1, model_2, terms, axis, &params, &mut rand::thread_rng()),
    }
}

/// Test statistic, effect size and p-value for two already computed score
/// vectors. Entry `i` of both vectors must belong to the same target term.
pub fn evaluate<R>(
    scores_1: Vec<f64>,
    scores_2: Vec<f64>,
    params: &TestParams,
    rng: &mut R,
) -> SweatResult<TestOutcome>
where
    R: Rng + ?Sized,
{
    params.validate()?;
    if scores_1.is_empty() {
        return Err(SweatError::invalid("score vectors are empty"));
    }
    if scores_1.len() != scores_2.len() {
        return Err(SweatError::invalid(format!(
            "paired score vectors differ in length: {} vs {}",
            scores_1.len(),
            scores_2.len()
        )));
    }
    for (slot, scores) in [(1u8, &scores_1), (2u8, &scores_2)] {
        if let Some(idx) = scores.iter().position(|s| !s.is_finite()) {
            return Err(SweatError::invalid(format!(
                "model {slot} score for term #{idx} is not finite: {}",
                scores[idx]
            )));
        }
    }

    let clock = time::Stopwatch::start();
    let k = scores_1.len();
    let sum_1: f64 = scores_1.iter().sum();
    let sum_2: f64 = scores_2.iter().sum();
    let score = sum_1 - sum_2;

    let (effect_size, degenerate) = effect_size(&scores_1, &scores_2, params.degenerate)?;

    let neutral = Neutrality {
        model_1: sum_1.abs() < NEUTRAL_THRESHOLD,
        model_2: sum_2.abs() < NEUTRAL_THRESHOLD,
    };
    if neutral.model_1 {
        warn!(ev = "neutral_model", slot = 1u8, sum = sum_1, "model 1 is neutral");
    }
    if neutral.model_2 {
        warn!(ev = "neutral_model", slot = 2u8, sum = sum_2, "model 2 is neutral");
    }

    let pool: Vec<f64> = scores_1.iter().chain(&scores_2).copied().collect();
    let null_samples = if params.parallel {
        permutation::null_distribution_parallel(&pool, k, params.permutations, rng)?
    } else {
        permutation::null_distribution(&pool, k, params.permutations, rng)?
    };
    let p_value = permutation::p_value(score, &null_samples, params.tail)?;

    info!(
        ev = "sweat_test",
        code = SweatCode::Ok as u32,
        dur_ms = clock.elapsed_ms(),
        terms = k,
        permutations = params.permutations,
        score,
        effect_size,
        p_value,
    );

    Ok(TestOutcome {
        score,
        effect_size,
        p_value,
        scores_1,
        scores_2,
        null_samples,
        neutral,
        degenerate,
    })
}

/// Difference of means over the pooled population standard deviation.
///
/// Returns the effect size and whether the degenerate policy produced it. Zero
/// spread with different means gives a signed infinity.
pub fn effect_size(
    scores_1: &[f64],
    scores_2: &[f64],
    policy: DegeneratePolicy,
) -> SweatResult<(f64, bool)> {
    let sd_1 = stats::population_std(scores_1);
    let sd_2 = stats::population_std(scores_2);
    let pool_std = ((sd_1.powi(2) + sd_2.powi(2)) / 2.0).sqrt();
    let diff = stats::mean(scores_1) - stats::mean(scores_2);

    if pool_std > 0.0 {
        return Ok((diff / pool_std, false));
    }
    if diff != 0.0 {
        warn!(ev = "zero_spread", diff, "effect size is unbounded");
        return Ok((f64::INFINITY.copysign(diff), false));
    }
    match policy {
        DegeneratePolicy::Zero => {
            warn!(
                ev = "degenerate_effect",
                code = SweatCode::DegenerateInput as u32,
                "constant equal scores, effect size set to 0"
            );
            Ok((0.0, true))
        }
        DegeneratePolicy::Reject => Err(SweatError::degenerate(
            "pooled standard deviation is zero and means are equal",
        )),
    }
}

/// Two models compared along one polarity axis.
///
/// Labels only feed the report helpers; the test itself never sees them.
#[derive(Clone, Debug)]
pub struct Sweat<M1, M2> {
    model_1: M1,
    model_2: M2,
    axis: PolarityAxis,
    labels: Labels,
}

impl<M1, M2> Sweat<M1, M2>
where
    M1: SimilarityProvider,
    M2: SimilarityProvider,
{
    pub fn new(model_1: M1, model_2: M2, axis: PolarityAxis) -> Self {
        Self {
            model_1,
            model_2,
            axis,
            labels: Labels::default(),
        }
    }

    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    pub fn axis(&self) -> &PolarityAxis {
        &self.axis
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn models(&self) -> (&M1, &M2) {
        (&self.model_1, &self.model_2)
    }

    pub fn test<S, R>(&self, terms: &[S], params: &TestParams, rng: &mut R) -> SweatResult<TestOutcome>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        run(&self.model_1, &self.model_2, terms, &self.axis, params, rng)
    }

    pub fn test_seeded<S>(&self, terms: &[S], params: &TestParams, seed: u64) -> SweatResult<TestOutcome>
    where
        S: AsRef<str>,
    {
        run_seeded(&self.model_1, &self.model_2, terms, &self.axis, params, seed)
    }

    pub fn test_configured<S>(&self, terms: &[S], cfg: &SweatCfg) -> SweatResult<TestOutcome>
    where
        S: AsRef<str>,
    {
        run_configured(&self.model_1, &self.model_2, terms, &self.axis, cfg)
    }

    /// Per-term details for both models, in model order.
    pub fn details<S>(&self, terms: &[S], inner_alpha: Option<f64>) -> SweatResult<[Vec<TermDetail>; 2]>
    where
        S: AsRef<str>,
    {
        Ok([
            report::term_details(&self.model_1, &self.axis, terms, inner_alpha)?,
            report::term_details(&self.model_2, &self.axis, terms, inner_alpha)?,
        ])
    }

    /// Cumulative association bars for both models, in model order.
    pub fn cumulative<S>(&self, terms: &[S]) -> SweatResult<[CumulativeAssociation; 2]>
    where
        S: AsRef<str>,
    {
        Ok([
            report::cumulative(&self.model_1, &self.axis, terms)?,
            report::cumulative(&self.model_2, &self.axis, terms)?,
        ])
    }

    /// Which model sides with which pole for this outcome.
    pub fn directionality(&self, outcome: &TestOutcome) -> Vec<String> {
        report::directionality(outcome.score, &self.labels)
    }
}
