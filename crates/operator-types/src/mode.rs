//! Execution mode of the operator process.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the executor stops after a successful re-simulation or submits
/// the transaction for on-chain execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
	/// Simulate only; stopping before submission is a normal terminal state.
	#[default]
	Preview,
	/// Submit the winning orders and await confirmation.
	Execute,
}

impl fmt::Display for ExecutionMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ExecutionMode::Preview => write!(f, "preview"),
			ExecutionMode::Execute => write!(f, "execute"),
		}
	}
}
