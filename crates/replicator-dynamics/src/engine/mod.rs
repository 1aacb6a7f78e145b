//! Replication engine module
pub mod simulator;

pub use self::simulator::ReplicatorEngine;
