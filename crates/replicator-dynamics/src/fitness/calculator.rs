//! Expected payoff under full mixing: π_i = Σ_j M[i][j] × p_j

use replicator_common::{PayoffMatrix, PopulationShares};
use serde::{Deserialize, Serialize};

/// Per-opponent contributions `M[i][j] × p_j` for one period
///
/// Row sums equal the expected payoffs of that period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairwiseTable {
    pub rows: Vec<Vec<f64>>,
}

impl PairwiseTable {
    #[inline]
    pub fn get(&self, strategy: usize, opponent: usize) -> f64 {
        self.rows[strategy][opponent]
    }

    /// Sum of a strategy's contributions, accumulated in opponent order
    pub fn row_total(&self, strategy: usize) -> f64 {
        self.rows[strategy].iter().fold(0.0, |acc, c| acc + c)
    }
}

/// The opponent a strategy earns the most against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestResponse {
    pub strategy: String,
    pub opponent: String,
    /// Static matrix entry for the pair
    pub payoff: f64,
}

/// Best-response opponent for every strategy, in strategy order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BestResponses(pub Vec<BestResponse>);

impl BestResponses {
    /// Opponent recorded for `strategy`
    pub fn opponent_of(&self, strategy: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|r| r.strategy == strategy)
            .map(|r| r.opponent.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &BestResponse> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub struct FitnessCalculator;

impl FitnessCalculator {
    /// Expected payoff of every strategy against the current population
    pub fn expected_payoffs(matrix: &PayoffMatrix, shares: &PopulationShares) -> Vec<f64> {
        (0..matrix.len())
            .map(|i| {
                matrix
                    .row(i)
                    .iter()
                    .zip(shares.iter())
                    .fold(0.0, |acc, (m, p)| acc + m * p)
            })
            .collect()
    }

    /// Contribution of every opponent to every strategy's expected payoff
    pub fn pairwise_contributions(
        matrix: &PayoffMatrix,
        shares: &PopulationShares,
    ) -> PairwiseTable {
        let rows = (0..matrix.len())
            .map(|i| {
                matrix
                    .row(i)
                    .iter()
                    .zip(shares.iter())
                    .map(|(m, p)| m * p)
                    .collect()
            })
            .collect();
        PairwiseTable { rows }
    }

    /// Opponent maximizing the raw matrix entry for each strategy
    ///
    /// Depends on the matrix only, never on shares. Ties go to the first
    /// opponent in strategy order.
    pub fn best_responses(matrix: &PayoffMatrix) -> BestResponses {
        let strategies = matrix.strategies();
        let responses = strategies
            .iter()
            .enumerate()
            .map(|(i, strategy)| {
                let (best, payoff) = matrix.row(i).iter().copied().enumerate().fold(
                    (0, f64::NEG_INFINITY),
                    |(bj, bv), (j, v)| if v > bv { (j, v) } else { (bj, bv) },
                );
                BestResponse {
                    strategy: strategy.to_string(),
                    opponent: strategies.names()[best].clone(),
                    payoff,
                }
            })
            .collect();
        BestResponses(responses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use replicator_common::StrategySet;

    fn matrix(rows: &[Vec<f64>]) -> PayoffMatrix {
        let names: Vec<String> = (0..rows.len()).map(|i| format!("S{i}")).collect();
        PayoffMatrix::from_rows(&StrategySet::new(names).unwrap(), rows).unwrap()
    }

    #[test]
    fn test_expected_payoffs_uniform() {
        let m = matrix(&[vec![3.0, 3.0], vec![0.0, 0.0]]);
        let pi = FitnessCalculator::expected_payoffs(&m, &PopulationShares::uniform(2));
        assert_eq!(pi, vec![3.0, 0.0]);
    }

    #[test]
    fn test_default_matrix_first_period() {
        let m = PayoffMatrix::default_automatons();
        let pi = FitnessCalculator::expected_payoffs(&m, &PopulationShares::uniform(8));
        let expected = [
            0.625,
            1.3125,
            1.125,
            1.5833333333333335,
            1.1145833333333333,
            1.84375,
            1.84375,
            1.4375,
        ];
        for (got, want) in pi.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "{got} != {want}");
        }
    }

    #[test]
    fn test_pairwise_rows_sum_to_expected() {
        let m = PayoffMatrix::default_automatons();
        let shares = PopulationShares::from_vec(vec![0.3, 0.1, 0.05, 0.05, 0.2, 0.1, 0.1, 0.1]);
        let pi = FitnessCalculator::expected_payoffs(&m, &shares);
        let table = FitnessCalculator::pairwise_contributions(&m, &shares);
        for (i, &p) in pi.iter().enumerate() {
            assert_eq!(table.row_total(i), p);
        }
        assert_eq!(table.get(1, 0), 3.0 * 0.3);
    }

    #[test]
    fn test_best_responses_default_matrix() {
        let br = FitnessCalculator::best_responses(&PayoffMatrix::default_automatons());
        assert_eq!(br.len(), 8);
        // ties resolve to the earliest opponent
        assert_eq!(br.opponent_of("DOVE"), Some("DOVE"));
        assert_eq!(br.opponent_of("HAWK"), Some("DOVE"));
        assert_eq!(br.opponent_of("GRIM"), Some("DOVE"));
        assert_eq!(br.opponent_of("TAT-FOR-TIT"), Some("TAT-FOR-TIT"));
        assert_eq!(br.opponent_of("TWEETYPIE"), Some("HAWK"));
        assert_eq!(br.opponent_of("PIGEON"), None);
    }

    #[test]
    fn test_best_responses_all_negative_row() {
        let m = matrix(&[vec![-3.0, -1.0], vec![-2.0, -2.0]]);
        let br = FitnessCalculator::best_responses(&m);
        assert_eq!(br.opponent_of("S0"), Some("S1"));
        assert_eq!(br.opponent_of("S1"), Some("S0"));
        assert_eq!(br.0[0].payoff, -1.0);
    }
}
