//! Simulation outcome types.
//!
//! A [`SimulationOutcome`] is produced and consumed within one polling cycle
//! and never persisted. Cost, tip and profit are expressed in one shared
//! value unit so outcomes are comparable across candidates.

use alloy::primitives::I256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Result of dry-running one eligible requisition.
///
/// `success` reflects the dry-run alone. The cost/profit fields are
/// optional on purpose: a price lookup or gas estimate may fail without
/// invalidating the simulation, and the ranker handles missing profit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationOutcome {
	pub success: bool,
	/// Short caller-facing reason when the dry-run reverted.
	pub failure_reason: Option<String>,
	/// Estimated resource cost of the execution call.
	pub gas_estimate: Option<u64>,
	/// Estimated execution cost in the shared value unit.
	pub cost_value: Option<Decimal>,
	/// Advertised tip in the order asset (fixed-point, signed).
	pub tip_amount: I256,
	/// Tip converted to the shared value unit.
	pub tip_value: Option<Decimal>,
	/// `tip_value - cost_value`, when both conversions succeeded.
	pub profit: Option<Decimal>,
}

impl SimulationOutcome {
	/// Outcome for a dry-run that reverted; no cost estimation is attempted.
	pub fn failed(reason: impl Into<String>, tip_amount: I256) -> Self {
		Self {
			success: false,
			failure_reason: Some(reason.into()),
			gas_estimate: None,
			cost_value: None,
			tip_amount,
			tip_value: None,
			profit: None,
		}
	}
}
