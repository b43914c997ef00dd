//! Data behind the detail and cumulative charts.

use tracing::info;

use crate::association::{self, PolarityAxis};
use crate::common::error::{SweatError, SweatResult};
use crate::similarity::SimilarityProvider;

use super::domain::{CumulativeAssociation, Direction, TermDetail};
use super::labels::Labels;

/// Per-term similarity samples under `model`.
///
/// With `inner_alpha`, each term also gets its own paired t-test and terms whose
/// p-value exceeds the threshold are marked [`Direction::NotSignificant`].
pub fn term_details<M, S>(
    model: &M,
    axis: &PolarityAxis,
    terms: &[S],
    inner_alpha: Option<f64>,
) -> SweatResult<Vec<TermDetail>>
where
    M: SimilarityProvider + ?Sized,
    S: AsRef<str>,
{
    if let Some(alpha) = inner_alpha {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(SweatError::invalid(format!(
                "inner significance threshold must be in (0, 1), got {alpha}"
            )));
        }
    }

    terms
        .iter()
        .map(|term| {
            let assoc = association::associate(model, axis, term.as_ref())?;
            let delta = assoc.delta();
            let mut direction = if delta < 0.0 {
                Direction::TowardB
            } else {
                Direction::TowardA
            };

            let inner_p_value = match inner_alpha {
                Some(alpha) => {
                    let inner = association::paired_t_test(&assoc.sims_a, &assoc.sims_b)?;
                    if inner.p_value > alpha {
                        direction = Direction::NotSignificant;
                    }
                    Some(inner.p_value)
                }
                None => None,
            };

            Ok(TermDetail {
                mean_a: assoc.mean_a(),
                mean_b: assoc.mean_b(),
                delta,
                inner_p_value,
                direction,
                term: assoc.term,
                sims_a: assoc.sims_a,
                sims_b: assoc.sims_b,
            })
        })
        .collect()
}

/// Split one model's per-term deltas into positive and negative mass.
pub fn cumulative<M, S>(model: &M, axis: &PolarityAxis, terms: &[S]) -> SweatResult<CumulativeAssociation>
where
    M: SimilarityProvider + ?Sized,
    S: AsRef<str>,
{
    let deltas = association::score_vector(model, axis, terms)?;
    let positive: f64 = deltas.iter().filter(|d| **d > 0.0).sum();
    let negative: f64 = deltas.iter().filter(|d| **d < 0.0).sum();
    let cumulative: f64 = deltas.iter().sum();

    Ok(CumulativeAssociation {
        model: model.name().to_string(),
        deltas,
        positive,
        negative,
        cumulative,
    })
}

/// Pairing of models to poles implied by the sign of `score`.
///
/// Negative: model 1 sides with B and model 2 with A. Positive: the reverse.
/// Zero yields nothing.
pub fn directionality(score: f64, labels: &Labels) -> Vec<String> {
    let lines = if score < 0.0 {
        vec![
            format!("{} ~ {}", labels.x1, labels.b),
            format!("{} ~ {}", labels.x2, labels.a),
        ]
    } else if score > 0.0 {
        vec![
            format!("{} ~ {}", labels.x1, labels.a),
            format!("{} ~ {}", labels.x2, labels.b),
        ]
    } else {
        Vec::new()
    };

    for line in &lines {
        info!(ev = "sweat_direction", score, "{line}");
    }
    lines
}
