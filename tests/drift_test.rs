use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use sweat::engine::{self, DegeneratePolicy, Sampling, Tail};
use sweat::report::{Direction, Labels};
use sweat::{
    EmbeddingTable, PolarityAxis, SimilarityProvider, Sweat, SweatCfg, SweatCode, SweatError,
    SweatResult, TestParams,
};

/// Provider where every term has a fixed lean: similarity `lean / 2` to members
/// of A and `-lean / 2` to everything else, so a term's association is its lean.
struct Leaning {
    name: &'static str,
    pole_a: Vec<&'static str>,
    leans: HashMap<&'static str, f64>,
}

impl Leaning {
    fn new(name: &'static str, leans: &[(&'static str, f64)]) -> Self {
        Self {
            name,
            pole_a: vec!["good", "positive"],
            leans: leans.iter().copied().collect(),
        }
    }
}

impl SimilarityProvider for Leaning {
    fn similarity(&self, term: &str, reference: &str) -> SweatResult<f64> {
        let lean = self
            .leans
            .get(term)
            .ok_or_else(|| SweatError::lookup(term, "unknown"))?;
        Ok(if self.pole_a.iter().any(|p| *p == reference) {
            lean / 2.0
        } else {
            -lean / 2.0
        })
    }

    fn name(&self) -> &str {
        self.name
    }
}

fn axis() -> PolarityAxis {
    PolarityAxis::new(["good", "positive"], ["bad", "negative"]).unwrap()
}

const TERMS: [&str; 6] = ["happy", "joy", "sunny", "calm", "warm", "bright"];

fn separated() -> (Leaning, Leaning) {
    let m1 = Leaning::new(
        "m1",
        &[
            ("happy", 0.4),
            ("joy", 0.35),
            ("sunny", 0.45),
            ("calm", 0.5),
            ("warm", 0.38),
            ("bright", 0.42),
        ],
    );
    let m2 = Leaning::new(
        "m2",
        &[
            ("happy", -0.3),
            ("joy", -0.25),
            ("sunny", -0.35),
            ("calm", -0.28),
            ("warm", -0.32),
            ("bright", -0.3),
        ],
    );
    (m1, m2)
}

fn mixed() -> (Leaning, Leaning) {
    let m1 = Leaning::new(
        "m1",
        &[
            ("happy", 0.2),
            ("joy", -0.1),
            ("sunny", 0.3),
            ("calm", 0.05),
            ("warm", -0.2),
            ("bright", 0.15),
        ],
    );
    let m2 = Leaning::new(
        "m2",
        &[
            ("happy", 0.1),
            ("joy", 0.0),
            ("sunny", 0.25),
            ("calm", -0.1),
            ("warm", -0.05),
            ("bright", 0.05),
        ],
    );
    (m1, m2)
}

#[test]
fn single_term_scenario() {
    let m1 = Leaning::new("m1", &[("happy", 0.4)]);
    let m2 = Leaning::new("m2", &[("happy", -0.3)]);
    let params = TestParams::default();

    let out = engine::run_seeded(&m1, &m2, &["happy"], &axis(), &params, 7).unwrap();
    assert!((out.score - 0.7).abs() < 1e-12);
    // one term per model: zero spread, different means
    assert!(out.effect_size > 0.0);
    assert!(out.p_value < 0.05);
    assert_eq!(out.record().score, 0.7);
}

#[test]
fn separated_models_are_significant() {
    let (m1, m2) = separated();
    let out = engine::run_seeded(&m1, &m2, &TERMS, &axis(), &TestParams::default(), 42).unwrap();
    assert_eq!(out.null_samples.len(), 10_000);
    assert!(out.score > 0.0);
    assert!(out.effect_size.is_finite() && out.effect_size > 0.0);
    assert!(out.p_value < 0.05);
    assert_eq!(out.scores_1.len(), TERMS.len());
    assert_eq!(out.scores_2.len(), TERMS.len());
}

#[test]
fn fixed_seed_repeats_exactly() {
    let (m1, m2) = mixed();
    let params = TestParams::default().with_permutations(2000);
    let a = engine::run_seeded(&m1, &m2, &TERMS, &axis(), &params, 5).unwrap();
    let b = engine::run_seeded(&m1, &m2, &TERMS, &axis(), &params, 5).unwrap();
    assert_eq!(a.null_samples, b.null_samples);
    assert_eq!(a.p_value, b.p_value);
    assert_eq!(a, b);
}

#[test]
fn swapping_models_negates_score_and_effect() {
    let (m1, m2) = separated();
    let params = TestParams::default().with_permutations(5000);
    let fwd = engine::run_seeded(&m1, &m2, &TERMS, &axis(), &params, 1).unwrap();
    let rev = engine::run_seeded(&m2, &m1, &TERMS, &axis(), &params, 1).unwrap();
    assert_eq!(fwd.score, -rev.score);
    assert_eq!(fwd.effect_size, -rev.effect_size);
    assert!(fwd.p_value < 0.05 && rev.p_value < 0.05);
    assert!((fwd.p_value - rev.p_value).abs() < 0.01);

    let (m1, m2) = mixed();
    let params = TestParams::default();
    let fwd = engine::run_seeded(&m1, &m2, &TERMS, &axis(), &params, 2).unwrap();
    let rev = engine::run_seeded(&m2, &m1, &TERMS, &axis(), &params, 2).unwrap();
    assert_eq!(fwd.score, -rev.score);
    assert_eq!(fwd.effect_size, -rev.effect_size);
    // same null distribution, different draws
    assert!((fwd.p_value - rev.p_value).abs() < 0.03);
}

#[test]
fn identical_vectors_tie_at_zero() {
    // dyadic values keep every partial sum exact
    let scores = vec![0.125, 0.25, 0.5];
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let out = engine::evaluate(scores.clone(), scores, &TestParams::default(), &mut rng).unwrap();
    assert_eq!(out.score, 0.0);
    // ties only when both halves hold the same multiset: 8 of 20 splits
    assert!(out.p_value > 0.55 && out.p_value < 0.65, "p = {}", out.p_value);
}

#[test]
fn identical_poles_hit_the_degenerate_policy() {
    let (m1, m2) = mixed();
    let flat = PolarityAxis::new(["good", "positive"], ["good", "positive"]).unwrap();
    let params = TestParams::default().with_permutations(500);

    let out = engine::run_seeded(&m1, &m2, &TERMS, &flat, &params, 9).unwrap();
    assert!(out.scores_1.iter().chain(&out.scores_2).all(|s| *s == 0.0));
    assert_eq!(out.score, 0.0);
    assert_eq!(out.effect_size, 0.0);
    assert!(out.degenerate);
    assert!(out.neutral.model_1 && out.neutral.model_2);
    // every candidate is exactly zero and ties with the observed statistic
    assert_eq!(out.p_value, 0.0);

    let strict = params.with_degenerate(DegeneratePolicy::Reject);
    let err = engine::run_seeded(&m1, &m2, &TERMS, &flat, &strict, 9).unwrap_err();
    assert_eq!(err.code(), SweatCode::DegenerateInput);
}

#[test]
fn effect_size_sign_follows_score() {
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    let params = TestParams::default().with_permutations(50);
    for _ in 0..25 {
        let s1: Vec<f64> = (0..5).map(|_| rng.gen_range(-1.0..1.0)).collect();
        let s2: Vec<f64> = (0..5).map(|_| rng.gen_range(-1.0..1.0)).collect();
        let out = engine::evaluate(s1, s2, &params, &mut rng).unwrap();
        if out.score.abs() > 1e-9 {
            assert_eq!(out.score.signum(), out.effect_size.signum());
        }
    }
}

#[test]
fn one_tailed_is_at_most_two_tailed() {
    let (m1, m2) = mixed();
    let two = TestParams::default().with_permutations(4000);
    let one = two.with_tail(Tail::OneTailed);
    let p_two = engine::run_seeded(&m1, &m2, &TERMS, &axis(), &two, 21).unwrap();
    let p_one = engine::run_seeded(&m1, &m2, &TERMS, &axis(), &one, 21).unwrap();
    assert_eq!(p_two.null_samples, p_one.null_samples);
    assert!(p_one.p_value <= p_two.p_value);
}

#[test]
fn parallel_trials_agree_statistically() {
    let (m1, m2) = mixed();
    let seq = TestParams::default();
    let par = seq.parallel(true);
    let a = engine::run_seeded(&m1, &m2, &TERMS, &axis(), &seq, 4).unwrap();
    let b = engine::run_seeded(&m1, &m2, &TERMS, &axis(), &par, 4).unwrap();
    assert_eq!(b.null_samples.len(), 10_000);
    assert_eq!(a.score, b.score);
    assert!((a.p_value - b.p_value).abs() < 0.03);
}

#[test]
fn failures_surface_to_the_caller() {
    let (m1, m2) = mixed();
    let params = TestParams::default().with_permutations(10);

    let err = engine::run_seeded(&m1, &m2, &["happy", "zzyzx"], &axis(), &params, 0).unwrap_err();
    assert_eq!(err.code(), SweatCode::ProviderLookup);

    let empty: [&str; 0] = [];
    let err = engine::run_seeded(&m1, &m2, &empty, &axis(), &params, 0).unwrap_err();
    assert_eq!(err.code(), SweatCode::InvalidConfiguration);

    let err = engine::run_seeded(&m1, &m2, &TERMS, &axis(), &params.with_permutations(0), 0)
        .unwrap_err();
    assert_eq!(err.code(), SweatCode::InvalidConfiguration);

    let independent = params.with_sampling(Sampling::Independent);
    let err = engine::run_seeded(&m1, &m2, &["zzyzx"], &axis(), &independent, 0).unwrap_err();
    assert_eq!(err.code(), SweatCode::UnsupportedOperation);
}

#[test]
fn facade_over_embedding_tables() {
    let vectors = [
        ("good", [1.0, 0.0, 0.0]),
        ("positive", [0.9, 0.1, 0.0]),
        ("bad", [-1.0, 0.0, 0.0]),
        ("negative", [-0.9, 0.0, 0.1]),
    ];
    let mut old = EmbeddingTable::new("1990s");
    let mut new = EmbeddingTable::new("2010s");
    for (term, v) in vectors {
        old.insert(term, v.to_vec()).unwrap();
        new.insert(term, v.to_vec()).unwrap();
    }
    old.insert("gay", vec![0.8, 0.3, 0.1]).unwrap();
    old.insert("cheerful", vec![0.7, 0.2, 0.2]).unwrap();
    new.insert("gay", vec![-0.2, 0.9, 0.3]).unwrap();
    new.insert("cheerful", vec![0.6, 0.3, 0.1]).unwrap();

    let labels =
        Labels::from_json(r#"{"X1":"1990s","X2":"2010s","A":"pleasant","B":"unpleasant"}"#)
            .unwrap();
    let sweat = Sweat::new(old, new, axis()).with_labels(labels);
    let terms = ["gay", "cheerful"];

    let out = sweat
        .test_seeded(&terms, &TestParams::default().with_permutations(1000), 8)
        .unwrap();
    assert!(out.score > 0.0);
    assert_eq!(
        sweat.directionality(&out),
        vec!["1990s ~ pleasant", "2010s ~ unpleasant"]
    );

    let record = serde_json::to_value(out.record()).unwrap();
    assert!(record.get("score").is_some());
    assert!(record.get("eff_size").is_some());
    assert!(record.get("p-val").is_some());

    let [old_details, new_details] = sweat.details(&terms, None).unwrap();
    assert_eq!(old_details[0].direction, Direction::TowardA);
    assert_eq!(new_details.len(), 2);

    let [old_bars, new_bars] = sweat.cumulative(&terms).unwrap();
    assert_eq!(old_bars.model, "1990s");
    assert!(old_bars.cumulative > new_bars.cumulative);
}

#[test]
fn configured_seed_makes_runs_repeatable() {
    let env: HashMap<&str, &str> = [("SWEAT_SEED", "7"), ("SWEAT_PERMUTATIONS", "500")].into();
    let cfg = SweatCfg::from_lookup(|k| env.get(k).map(|v| v.to_string()));
    assert_eq!(cfg.seed, Some(7));

    let (m1, m2) = separated();
    let a = engine::run_configured(&m1, &m2, &TERMS, &axis(), &cfg).unwrap();
    let b = engine::run_configured(&m1, &m2, &TERMS, &axis(), &cfg).unwrap();
    assert_eq!(a.null_samples.len(), 500);
    assert_eq!(a, b);

    // same stream as passing the seed explicitly
    let explicit = engine::run_seeded(&m1, &m2, &TERMS, &axis(), &cfg.test_params(), 7).unwrap();
    assert_eq!(a, explicit);

    let sweat = Sweat::new(m1, m2, axis());
    assert_eq!(sweat.test_configured(&TERMS, &cfg).unwrap(), a);
}
