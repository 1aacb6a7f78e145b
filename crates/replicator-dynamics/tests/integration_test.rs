//! Integration Tests for Replicator
//!
//! This module tests the full run path:
//! - Payoff table validation → engine
//! - Distribution invariants over every period
//! - Reference run over the default automatons
//! - Result analysis over finished runs

use replicator_common::{
    Automaton, PayoffError, PayoffMatrix, PayoffTable, ReplicatorError, StrategySet,
};
use replicator_dynamics::{
    run, DynamicsConfig, FinalReport, PayoffTimeline, PeriodBreakdown, ReplicatorEngine,
    Simulation,
};
use std::collections::BTreeMap;

const TOLERANCE: f64 = 1e-9;

fn table(rows: &[(&str, &[(&str, f64)])]) -> PayoffTable {
    rows.iter()
        .map(|(strategy, entries)| {
            let row: BTreeMap<String, f64> = entries
                .iter()
                .map(|&(opponent, v)| (opponent.to_string(), v))
                .collect();
            (strategy.to_string(), row)
        })
        .collect()
}

fn default_run(num_periods: usize) -> Simulation {
    ReplicatorEngine::new(DynamicsConfig {
        num_periods,
        ..DynamicsConfig::default()
    })
    .run(&PayoffMatrix::default_automatons())
    .unwrap()
}

#[cfg(test)]
mod contract_tests {
    use super::*;

    /// Test: Equal payoffs exert no reweighting pressure
    #[test]
    fn test_equal_payoffs() {
        let strategies = StrategySet::new(["A", "B"]).unwrap();
        let payoffs = table(&[
            ("A", &[("A", 1.0), ("B", 1.0)]),
            ("B", &[("A", 1.0), ("B", 1.0)]),
        ]);
        let sim = run(&strategies, &payoffs, 5).unwrap();
        assert_eq!(sim.history().len(), 6);
        for shares in sim.history() {
            assert_eq!(shares.as_slice(), &[0.5, 0.5]);
        }
    }

    /// Test: Symmetric self-reinforcement ties at the uniform start and never moves
    #[test]
    fn test_symmetric_self_reinforcing() {
        let strategies = StrategySet::new(["A", "B"]).unwrap();
        let payoffs = table(&[
            ("A", &[("A", 2.0), ("B", 0.0)]),
            ("B", &[("A", 0.0), ("B", 2.0)]),
        ]);
        let sim = run(&strategies, &payoffs, 50).unwrap();
        assert_eq!(sim.payoffs_of("A").unwrap()[0], 1.0);
        assert_eq!(sim.payoffs_of("B").unwrap()[0], 1.0);
        assert!(sim.history().iter().all(|p| p.as_slice() == &[0.5, 0.5]));
    }

    /// Test: A strictly dominant strategy grows every period without reaching 1
    #[test]
    fn test_strict_dominance() {
        let strategies = StrategySet::new(["A", "B"]).unwrap();
        let payoffs = table(&[
            ("A", &[("A", 3.0), ("B", 3.0)]),
            ("B", &[("A", 0.0), ("B", 0.0)]),
        ]);
        let sim = run(&strategies, &payoffs, 15).unwrap();

        let a = sim.shares_of("A").unwrap();
        assert!(a.windows(2).all(|w| w[1] > w[0]));
        assert!(a.iter().all(|&p| p < 1.0));

        for adj in sim.multipliers() {
            assert!((adj[0] - 4.0).abs() < 1e-12);
            assert_eq!(adj[1], 1.0);
        }
    }

    /// Test: Missing payoff entries fail before any computation
    #[test]
    fn test_missing_entry_rejected() {
        let strategies = StrategySet::new(["A", "B"]).unwrap();
        let payoffs = table(&[("A", &[("A", 1.0), ("B", 1.0)]), ("B", &[("B", 1.0)])]);
        let err = run(&strategies, &payoffs, 5).unwrap_err();
        match err {
            ReplicatorError::Payoff(PayoffError::MissingEntry { strategy, opponent }) => {
                assert_eq!(strategy, "B");
                assert_eq!(opponent, "A");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    /// Test: Zero periods is rejected rather than returning the initial state
    #[test]
    fn test_zero_periods_rejected() {
        let matrix = PayoffMatrix::default_automatons();
        let err = run(matrix.strategies(), &matrix.to_table(), 0).unwrap_err();
        assert!(err.to_string().contains("Invalid period count"));
    }
}

#[cfg(test)]
mod invariant_tests {
    use super::*;

    /// Test: Every share vector is a distribution, lengths match the period count
    #[test]
    fn test_history_shape_and_simplex() {
        for periods in [1, 10, 100, 200] {
            let sim = default_run(periods);
            assert_eq!(sim.history().len(), periods + 1);
            assert_eq!(sim.num_periods(), periods);
            for series in sim.payoff_history() {
                assert_eq!(series.payoffs.len(), periods);
            }
            for shares in sim.history() {
                assert!(shares.is_distribution(TOLERANCE));
            }
        }
    }

    /// Test: The first vector is exactly uniform
    #[test]
    fn test_initial_uniform() {
        let sim = default_run(3);
        assert!(sim.initial().iter().all(|&p| p == 1.0 / 8.0));
    }

    /// Test: Every multiplier respects the floor of 1
    #[test]
    fn test_floor_property() {
        let sim = default_run(100);
        for adj in sim.multipliers() {
            assert!(adj.iter().all(|&a| a >= 1.0));
        }
    }

    /// Test: Identical inputs give bit-identical outputs
    #[test]
    fn test_determinism() {
        let first = default_run(100);
        let second = default_run(100);
        assert_eq!(first, second);
    }

    /// Test: Payoffs are computed from the shares before each update
    #[test]
    fn test_payoffs_use_pre_update_shares() {
        let sim = default_run(5);
        let matrix = PayoffMatrix::default_automatons();
        for period in 0..sim.num_periods() {
            let shares = &sim.history()[period];
            let expected =
                replicator_dynamics::FitnessCalculator::expected_payoffs(&matrix, shares);
            assert_eq!(sim.expected_payoffs_at(period).unwrap(), expected);
        }
    }
}

#[cfg(test)]
mod reference_run_tests {
    use super::*;

    fn final_share(sim: &Simulation, automaton: Automaton) -> f64 {
        sim.final_shares()[automaton.index()]
    }

    fn assert_close(got: f64, want: f64) {
        let scale = want.abs().max(f64::MIN_POSITIVE);
        assert!(
            ((got - want) / scale).abs() < 1e-9,
            "got {got:e}, want {want:e}"
        );
    }

    /// Test: HAWK and TWEETYPIE end above DOVE and GRIM after 100 periods
    #[test]
    fn test_hawk_and_tweetypie_outlast_dove_and_grim() {
        let sim = default_run(100);
        for strong in [Automaton::Hawk, Automaton::Tweetypie] {
            for weak in [Automaton::Dove, Automaton::Grim] {
                assert!(
                    final_share(&sim, strong) > final_share(&sim, weak),
                    "{strong} should outlast {weak}"
                );
            }
        }
    }

    /// Test: Recorded final distribution of the reference run
    #[test]
    fn test_golden_final_distribution() {
        let sim = default_run(100);
        let golden = [
            (Automaton::Dove, 4.245643708167165e-27),
            (Automaton::Hawk, 1.4823152716354803e-06),
            (Automaton::Grim, 3.028172228227874e-13),
            (Automaton::TitForTat, 0.10266211776797363),
            (Automaton::TatForTit, 0.0006234163437276407),
            (Automaton::Tweedledum, 0.32721262416022046),
            (Automaton::Tweedledee, 0.32721262416022046),
            (Automaton::Tweetypie, 0.24228773525228345),
        ];
        for (automaton, want) in golden {
            assert_close(final_share(&sim, automaton), want);
        }
    }

    /// Test: Recorded state after the first period
    #[test]
    fn test_golden_first_step() {
        let sim = default_run(1);
        let golden = [
            0.08604522890237175,
            0.12244897959183673,
            0.11252068394925537,
            0.13678985107556535,
            0.11196911196911194,
            0.15057915057915058,
            0.15057915057915058,
            0.12906784335355764,
        ];
        for (got, want) in sim.history()[1].iter().zip(golden) {
            assert_close(*got, want);
        }
    }

    /// Test: Identical rows evolve identically
    #[test]
    fn test_twin_strategies_track_each_other() {
        let sim = default_run(100);
        let dum = sim.shares_of("TWEEDLEDUM").unwrap();
        let dee = sim.shares_of("TWEEDLEDEE").unwrap();
        assert_eq!(dum, dee);
    }
}

#[cfg(test)]
mod analysis_tests {
    use super::*;

    /// Test: Final report of the reference run
    #[test]
    fn test_reference_final_report() {
        let report = FinalReport::from_simulation(&default_run(100));
        assert_eq!(report.entries.len(), 8);
        assert_eq!(report.most_dominant().unwrap().strategy, "TWEEDLEDUM");
        assert_eq!(report.least_common().unwrap().strategy, "DOVE");
        let sum: f64 = report.entries.iter().map(|e| e.probability).sum();
        assert!((sum - 1.0).abs() < TOLERANCE);
        assert!(report.concentration > 1.0 / 8.0 && report.concentration < 1.0);
    }

    /// Test: Breakdown, best responses and timeline agree with the run
    #[test]
    fn test_breakdowns_agree_with_history() {
        let engine = ReplicatorEngine::new(DynamicsConfig::with_diagnostics(12));
        let sim = engine.run(&PayoffMatrix::default_automatons()).unwrap();
        let timeline = PayoffTimeline::from_simulation(&sim);

        for breakdown in PeriodBreakdown::range(&sim, 0..=11).unwrap() {
            for entry in &breakdown.payoffs {
                assert_eq!(
                    timeline.cell(&entry.strategy, &breakdown.label),
                    Some(entry.payoff)
                );
            }
            let best = breakdown.best_responses.unwrap();
            assert_eq!(best.opponent_of("TWEETYPIE"), Some("HAWK"));
        }
    }

    /// Test: Editing a matrix yields an independent run
    #[test]
    fn test_edited_matrix_runs_independently() {
        let base = PayoffMatrix::default_automatons();
        let edited = base.with_entry("DOVE", "HAWK", 4.0).unwrap();
        let engine = ReplicatorEngine::new(DynamicsConfig {
            num_periods: 20,
            ..DynamicsConfig::default()
        });

        let a = engine.run(&base).unwrap();
        let b = engine.run(&edited).unwrap();
        assert_ne!(a.final_shares(), b.final_shares());
        assert_eq!(base, PayoffMatrix::default_automatons());
    }

    /// Test: A simulation survives a JSON round trip for external consumers
    #[test]
    fn test_simulation_serializes() {
        let sim = ReplicatorEngine::new(DynamicsConfig::with_diagnostics(3))
            .run(&PayoffMatrix::default_automatons())
            .unwrap();
        let json = serde_json::to_string(&sim).unwrap();
        assert!(json.contains("\"pairwise_history\""));
        let back: Simulation = serde_json::from_str(&json).unwrap();
        assert_eq!(back.history().len(), 4);
        assert_eq!(back.strategies(), sim.strategies());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn matrix_strategy() -> impl Strategy<Value = (usize, Vec<f64>)> {
        (1usize..=6).prop_flat_map(|k| (Just(k), prop::collection::vec(-10.0f64..10.0, k * k)))
    }

    proptest! {
        #[test]
        fn prop_history_stays_on_simplex((k, values) in matrix_strategy(), periods in 1usize..60) {
            let names: Vec<String> = (0..k).map(|i| format!("S{i}")).collect();
            let strategies = StrategySet::new(names).unwrap();
            let rows: Vec<Vec<f64>> = values.chunks(k).map(<[f64]>::to_vec).collect();
            let matrix = PayoffMatrix::from_rows(&strategies, &rows).unwrap();

            let sim = ReplicatorEngine::new(DynamicsConfig {
                num_periods: periods,
                ..DynamicsConfig::default()
            })
            .run(&matrix)
            .unwrap();

            prop_assert_eq!(sim.history().len(), periods + 1);
            prop_assert!(sim.initial().iter().all(|&p| p == 1.0 / k as f64));
            for shares in sim.history() {
                prop_assert!(shares.is_distribution(TOLERANCE));
            }
            for adj in sim.multipliers() {
                prop_assert!(adj.iter().all(|&a| a >= 1.0));
            }
        }
    }
}
