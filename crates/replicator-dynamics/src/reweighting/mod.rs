//! Reweighting module
pub mod policy;

pub use self::policy::{reweight, FloorShift};
