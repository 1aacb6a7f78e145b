//! Core data types for Replicator

pub mod automaton;
pub mod payoff_matrix;
pub mod shares;
pub mod strategy_set;
