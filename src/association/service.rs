//! Association scoring of single terms against a polarity axis.

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::common::error::{SweatError, SweatResult};
use crate::common::stats;
use crate::similarity::SimilarityProvider;

use super::domain::{InnerTest, PolarityAxis, TermAssociation};

/// Similarities of `term` to every member of A and B under `model`.
///
/// Lookup failures propagate; a single unknown term invalidates the test.
pub fn associate<M>(model: &M, axis: &PolarityAxis, term: &str) -> SweatResult<TermAssociation>
where
    M: SimilarityProvider + ?Sized,
{
    let sims_a = axis
        .a()
        .iter()
        .map(|a| model.similarity(term, a))
        .collect::<SweatResult<Vec<_>>>()?;
    let sims_b = axis
        .b()
        .iter()
        .map(|b| model.similarity(term, b))
        .collect::<SweatResult<Vec<_>>>()?;

    Ok(TermAssociation {
        term: term.to_string(),
        sims_a,
        sims_b,
    })
}

/// Mean similarity to A minus mean similarity to B.
pub fn score<M>(model: &M, axis: &PolarityAxis, term: &str) -> SweatResult<f64>
where
    M: SimilarityProvider + ?Sized,
{
    Ok(associate(model, axis, term)?.delta())
}

/// Paired t-test of the A-similarities against the B-similarities of `term`.
pub fn score_with_significance<M>(
    model: &M,
    axis: &PolarityAxis,
    term: &str,
) -> SweatResult<InnerTest>
where
    M: SimilarityProvider + ?Sized,
{
    let assoc = associate(model, axis, term)?;
    paired_t_test(&assoc.sims_a, &assoc.sims_b)
}

/// Score every term in order, producing one model's score vector.
pub fn score_vector<M, S>(model: &M, axis: &PolarityAxis, terms: &[S]) -> SweatResult<Vec<f64>>
where
    M: SimilarityProvider + ?Sized,
    S: AsRef<str>,
{
    terms
        .iter()
        .map(|term| score(model, axis, term.as_ref()))
        .collect()
}

/// Two-sided paired t-test on `a[i] - b[i]`.
///
/// Pairs are matched by position, so both samples need the same length and at
/// least two entries. When every difference is identical the statistic is `0`
/// (p = 1) for a zero mean and signed infinity (p = 0) otherwise.
pub fn paired_t_test(a: &[f64], b: &[f64]) -> SweatResult<InnerTest> {
    if a.len() != b.len() {
        return Err(SweatError::invalid(format!(
            "paired test needs equal group sizes, got {} and {}",
            a.len(),
            b.len()
        )));
    }
    let n = a.len();
    if n < 2 {
        return Err(SweatError::invalid("paired test needs at least two pairs"));
    }

    let diffs: Vec<f64> = a.iter().zip(b).map(|(x, y)| x - y).collect();
    let mean_d = stats::mean(&diffs);
    let sd = stats::sample_std(&diffs);

    if sd == 0.0 {
        return Ok(if mean_d == 0.0 {
            InnerTest {
                statistic: 0.0,
                p_value: 1.0,
            }
        } else {
            InnerTest {
                statistic: f64::INFINITY.copysign(mean_d),
                p_value: 0.0,
            }
        });
    }

    let t = mean_d / (sd / (n as f64).sqrt());
    let dist = StudentsT::new(0.0, 1.0, (n - 1) as f64)
        .map_err(|e| SweatError::invalid(format!("student t: {e}")))?;
    let p_value = (2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0);

    Ok(InnerTest {
        statistic: t,
        p_value,
    })
}
