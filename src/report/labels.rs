//! Display names for the two models and the two poles.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::common::error::{SweatError, SweatResult};

const REQUIRED_KEYS: [&str; 4] = ["X1", "X2", "A", "B"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    #[serde(rename = "X1")]
    pub x1: String,
    #[serde(rename = "X2")]
    pub x2: String,
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self::new("X1", "X2", "A", "B")
    }
}

impl Labels {
    pub fn new(
        x1: impl Into<String>,
        x2: impl Into<String>,
        a: impl Into<String>,
        b: impl Into<String>,
    ) -> Self {
        Self {
            x1: x1.into(),
            x2: x2.into(),
            a: a.into(),
            b: b.into(),
        }
    }

    /// Parse a JSON object holding exactly the keys `X1`, `X2`, `A` and `B`.
    pub fn from_json(raw: &str) -> SweatResult<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| SweatError::invalid(format!("labels are not valid JSON: {e}")))?;
        let object = value
            .as_object()
            .ok_or_else(|| SweatError::invalid("labels must be a JSON object"))?;

        let keys: BTreeSet<&str> = object.keys().map(String::as_str).collect();
        let required: BTreeSet<&str> = REQUIRED_KEYS.into_iter().collect();
        if keys != required {
            return Err(SweatError::invalid(format!(
                "label keys must be {REQUIRED_KEYS:?}, got {keys:?}"
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| SweatError::invalid(format!("label values must be strings: {e}")))
    }
}
