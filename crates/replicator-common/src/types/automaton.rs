//! Automaton - the eight default behavioral strategies
//!
//! The declaration order is the canonical indexing order used by the default
//! strategy set and the reference payoff matrix.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::StrategyError;

/// Default strategy identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Automaton {
    #[serde(rename = "DOVE")]
    Dove,
    #[serde(rename = "HAWK")]
    Hawk,
    #[serde(rename = "GRIM")]
    Grim,
    #[serde(rename = "TIT-FOR-TAT")]
    TitForTat,
    #[serde(rename = "TAT-FOR-TIT")]
    TatForTit,
    #[serde(rename = "TWEEDLEDUM")]
    Tweedledum,
    #[serde(rename = "TWEEDLEDEE")]
    Tweedledee,
    #[serde(rename = "TWEETYPIE")]
    Tweetypie,
}

impl Automaton {
    /// All automatons in canonical order
    pub const ALL: [Automaton; 8] = [
        Automaton::Dove,
        Automaton::Hawk,
        Automaton::Grim,
        Automaton::TitForTat,
        Automaton::TatForTit,
        Automaton::Tweedledum,
        Automaton::Tweedledee,
        Automaton::Tweetypie,
    ];

    /// Number of default automatons
    pub const COUNT: usize = Self::ALL.len();

    /// Canonical display name
    pub const fn name(&self) -> &'static str {
        match self {
            Automaton::Dove => "DOVE",
            Automaton::Hawk => "HAWK",
            Automaton::Grim => "GRIM",
            Automaton::TitForTat => "TIT-FOR-TAT",
            Automaton::TatForTit => "TAT-FOR-TIT",
            Automaton::Tweedledum => "TWEEDLEDUM",
            Automaton::Tweedledee => "TWEEDLEDEE",
            Automaton::Tweetypie => "TWEETYPIE",
        }
    }

    /// Position in the canonical order
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Automaton {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.name() == s)
            .ok_or_else(|| StrategyError::Unknown {
                name: s.to_string(),
            })
    }
}
