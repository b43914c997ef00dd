//! Runtime configuration loaded from the process environment.
//!
//! Unparseable values fall back to their defaults, matching how the rest of the
//! crate treats configuration as advisory rather than fatal.
//!
//! TODO: Read the inner per-term alpha from `SWEAT_INNER_ALPHA`.

use std::env;

use crate::engine::domain::{Tail, TestParams};

pub const DEFAULT_PERMUTATIONS: usize = 10_000;

/// Snapshot of configuration values consumed by the core.
#[derive(Clone, Debug, PartialEq)]
pub struct SweatCfg {
    pub permutations: usize,
    pub two_tailed: bool,
    pub seed: Option<u64>,
    pub parallel: bool,
    pub log_level: String,
}

impl Default for SweatCfg {
    fn default() -> Self {
        Self {
            permutations: DEFAULT_PERMUTATIONS,
            two_tailed: true,
            seed: None,
            parallel: false,
            log_level: "info".to_string(),
        }
    }
}

impl SweatCfg {
    /// Create a configuration snapshot from the process environment.
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a snapshot from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Self {
            permutations: lookup("SWEAT_PERMUTATIONS")
                .and_then(|v| v.trim().parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(defaults.permutations),
            two_tailed: lookup("SWEAT_TWO_TAILED")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.two_tailed),
            seed: lookup("SWEAT_SEED").and_then(|v| v.trim().parse().ok()),
            parallel: lookup("SWEAT_PARALLEL")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.parallel),
            log_level: env_or("SWEAT_LOG_LEVEL", &defaults.log_level),
        }
    }

    /// Test parameters derived from this snapshot.
    pub fn test_params(&self) -> TestParams {
        TestParams {
            permutations: self.permutations,
            tail: if self.two_tailed {
                Tail::TwoTailed
            } else {
                Tail::OneTailed
            },
            parallel: self.parallel,
            ..TestParams::default()
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
