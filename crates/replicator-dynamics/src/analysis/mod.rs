//! Result analysis
//!
//! Tabular views over a finished [`Simulation`](crate::Simulation) for
//! whatever presents it: the ranked final distribution, per-period
//! breakdowns and the payoff timeline.

pub mod breakdown;
pub mod report;
pub mod timeline;

pub use breakdown::{PeriodBreakdown, PeriodPayoff};
pub use report::{FinalReport, RankedShare};
pub use timeline::{PayoffTimeline, TimelineRow};
