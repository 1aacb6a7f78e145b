//! Final distribution summary: ranking, extremes and concentration

use serde::{Deserialize, Serialize};

use crate::simulation::Simulation;

/// One strategy's place in the final distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedShare {
    /// 1-based, highest share first
    pub rank: usize,
    pub strategy: String,
    pub probability: f64,
    pub percentage: f64,
}

/// Summary of the last share vector of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalReport {
    pub entries: Vec<RankedShare>,
    /// Herfindahl index Σp² of the final shares
    pub concentration: f64,
}

impl FinalReport {
    /// Rank final shares descending; ties keep strategy order
    pub fn from_simulation(simulation: &Simulation) -> Self {
        let shares = simulation.final_shares();
        let mut ranked: Vec<(&str, f64)> = simulation
            .strategies()
            .iter()
            .zip(shares.iter().copied())
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let entries = ranked
            .into_iter()
            .enumerate()
            .map(|(i, (strategy, probability))| RankedShare {
                rank: i + 1,
                strategy: strategy.to_string(),
                probability,
                percentage: probability * 100.0,
            })
            .collect();

        Self {
            entries,
            concentration: shares.concentration(),
        }
    }

    pub fn most_dominant(&self) -> Option<&RankedShare> {
        self.entries.first()
    }

    pub fn least_common(&self) -> Option<&RankedShare> {
        self.entries.last()
    }

    /// Entry for a strategy by name
    pub fn entry(&self, strategy: &str) -> Option<&RankedShare> {
        self.entries.iter().find(|e| e.strategy == strategy)
    }
}

impl std::fmt::Display for FinalReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{:>4}  {:<12} {:>10}  {:>12}",
            "Rank", "Automaton", "Percentage", "Probability"
        )?;
        for e in &self.entries {
            writeln!(
                f,
                "{:>4}  {:<12} {:>9.2}%  {:>12.4}",
                e.rank, e.strategy, e.percentage, e.probability
            )?;
        }
        write!(f, "Concentration: {:.3}", self.concentration)
    }
}
