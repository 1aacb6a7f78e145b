//! StrategySet - ordered, distinct strategy identifiers
//!
//! The order defines the indexing of share vectors and payoff matrices. It is
//! significant for reproducibility but carries no meaning of its own.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::automaton::Automaton;
use crate::error::StrategyError;

/// Validated ordered strategy identifiers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct StrategySet {
    names: Vec<String>,
}

impl StrategySet {
    /// Create a strategy set, rejecting empty, blank or duplicate names
    pub fn new<I, S>(names: I) -> Result<Self, StrategyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(StrategyError::Empty);
        }

        let mut seen = HashSet::with_capacity(names.len());
        for (index, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(StrategyError::BlankName { index });
            }
            if !seen.insert(name.as_str()) {
                return Err(StrategyError::Duplicate { name: name.clone() });
            }
        }

        Ok(Self { names })
    }

    /// The eight default automatons in canonical order
    pub fn automatons() -> Self {
        Self {
            names: Automaton::ALL.iter().map(|a| a.name().to_string()).collect(),
        }
    }

    /// Number of strategies (K)
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false for a constructed set
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Index of a strategy by name
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Name at an index
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl TryFrom<Vec<String>> for StrategySet {
    type Error = StrategyError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(names)
    }
}

impl From<StrategySet> for Vec<String> {
    fn from(set: StrategySet) -> Self {
        set.names
    }
}

impl std::fmt::Display for StrategySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.names.join(", "))
    }
}
