//! Fitness module
pub mod calculator;

pub use self::calculator::{BestResponse, BestResponses, FitnessCalculator, PairwiseTable};
