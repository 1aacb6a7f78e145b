//! PopulationShares - frequency of each strategy at one period
//!
//! Entries are non-negative and sum to 1, indexed in strategy-set order.

use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Population-share vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PopulationShares(Vec<f64>);

impl PopulationShares {
    /// Uniform start `[1/k; k]`
    pub fn uniform(k: usize) -> Self {
        Self(vec![1.0 / k as f64; k])
    }

    /// Wrap raw shares without renormalizing
    pub fn from_vec(shares: Vec<f64>) -> Self {
        Self(shares)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.0.iter()
    }

    /// Sum of all shares
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Non-negative entries summing to 1 within `tolerance`
    pub fn is_distribution(&self, tolerance: f64) -> bool {
        self.0.iter().all(|&p| p >= 0.0 && p.is_finite()) && (self.sum() - 1.0).abs() <= tolerance
    }

    /// Herfindahl index Σp²; 1/k when uniform, 1 when a single strategy holds everything
    pub fn concentration(&self) -> f64 {
        self.0.iter().map(|p| p * p).sum()
    }

    /// Index of the largest share, first wins on ties
    pub fn argmax(&self) -> Option<usize> {
        self.0
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, &p)| match best {
                Some((_, b)) if b >= p => best,
                _ => Some((i, p)),
            })
            .map(|(i, _)| i)
    }
}

impl Index<usize> for PopulationShares {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl AsRef<[f64]> for PopulationShares {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}
