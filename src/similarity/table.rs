//! In-memory embedding table answering cosine similarity queries.
//!
//! Vectors are supplied by the caller; reading model files is left to whoever
//! owns the embedding backend.

use std::collections::HashMap;

use crate::common::error::{SweatError, SweatResult};

use super::domain::SimilarityProvider;

/// Term to vector lookup with a fixed dimension.
#[derive(Clone, Debug, Default)]
pub struct EmbeddingTable {
    name: String,
    dim: Option<usize>,
    vectors: HashMap<String, Vec<f32>>,
}

impl EmbeddingTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dim: None,
            vectors: HashMap::new(),
        }
    }

    /// Insert or replace a vector. The first insert fixes the dimension.
    pub fn insert(&mut self, term: impl Into<String>, vector: Vec<f32>) -> SweatResult<()> {
        let term = term.into();
        if vector.is_empty() {
            return Err(SweatError::invalid(format!("empty vector for `{term}`")));
        }
        if let Some(idx) = vector.iter().position(|x| !x.is_finite()) {
            return Err(SweatError::invalid(format!(
                "vector for `{term}` has a non-finite component at {idx}"
            )));
        }
        match self.dim {
            Some(dim) if dim != vector.len() => {
                return Err(SweatError::invalid(format!(
                    "vector for `{term}` has dimension {}, table expects {dim}",
                    vector.len()
                )));
            }
            Some(_) => {}
            None => self.dim = Some(vector.len()),
        }
        self.vectors.insert(term, vector);
        Ok(())
    }

    /// Builder-style insert.
    pub fn with(mut self, term: impl Into<String>, vector: Vec<f32>) -> SweatResult<Self> {
        self.insert(term, vector)?;
        Ok(self)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.vectors.contains_key(term)
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn dim(&self) -> Option<usize> {
        self.dim
    }

    fn vector(&self, term: &str) -> SweatResult<&[f32]> {
        self.vectors
            .get(term)
            .map(Vec::as_slice)
            .ok_or_else(|| SweatError::lookup(term, format!("not in vocabulary of `{}`", self.name)))
    }
}

impl SimilarityProvider for EmbeddingTable {
    fn similarity(&self, term_a: &str, term_b: &str) -> SweatResult<f64> {
        let a = self.vector(term_a)?;
        let b = self.vector(term_b)?;
        Ok(cosine(a, b))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Cosine similarity accumulated in f64; zero-norm inputs give `0.0`.
pub fn cosine(a: &[f32], b: &[f32]) -> f64 {
    let (mut dot, mut na, mut nb) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    (dot / (na.sqrt() * nb.sqrt())).clamp(-1.0, 1.0)
}
