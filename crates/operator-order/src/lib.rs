//! Order evaluation.
//!
//! Narrows the cycle's snapshots down to what this operator may execute,
//! dry-runs each candidate, and ranks the survivors by estimated profit.

pub mod eligibility;
pub mod ranking;
pub mod simulation;

pub use eligibility::*;
pub use ranking::*;
pub use simulation::Simulator;
