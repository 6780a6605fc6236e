//! Dimensional score vectors.

use crate::dimension::Dimension;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A score in [0, 100] for each of the eight dimensions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionScores(BTreeMap<Dimension, f64>);

impl DimensionScores {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Build a vector with the same score for every dimension.
    pub fn uniform(score: f64) -> Self {
        let mut scores = Self::new();
        for dim in Dimension::ALL {
            scores.set(dim, score);
        }
        scores
    }

    pub fn set(&mut self, dimension: Dimension, score: f64) {
        self.0.insert(dimension, score);
    }

    pub fn get(&self, dimension: Dimension) -> Option<f64> {
        self.0.get(&dimension).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        self.0.iter().map(|(d, s)| (*d, *s))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The `n` highest-scoring dimensions. Ties order by dimension code.
    pub fn top(&self, n: usize) -> Vec<Dimension> {
        let mut ranked: Vec<(Dimension, f64)> = self.iter().collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.code().cmp(b.0.code()))
        });
        ranked.into_iter().take(n).map(|(d, _)| d).collect()
    }
}

impl FromIterator<(Dimension, f64)> for DimensionScores {
    fn from_iter<I: IntoIterator<Item = (Dimension, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
