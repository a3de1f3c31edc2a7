//! Execution simulator.
//!
//! Dry-runs each eligible requisition against current ledger state and
//! derives an estimated profit in the shared value unit. A revert stops
//! the candidate immediately; every later step (gas estimate, gas price,
//! rate lookups) may fail on its own without failing the simulation, so a
//! successful outcome can legitimately miss cost and profit.

use std::sync::Arc;

use alloy::primitives::{Address, I256};
use rust_decimal::Decimal;
use tracing::warn;

use operator_codec::encode_tractor_call;
use operator_ledger::{Ledger, PriceOracle};
use operator_types::{RequisitionSnapshot, SimulationOutcome, AMOUNT_DECIMALS};

/// Decimals of the base asset (wei per unit).
const BASE_ASSET_DECIMALS: u32 = 18;

pub struct Simulator {
	ledger: Arc<dyn Ledger>,
	oracle: Arc<dyn PriceOracle>,
	/// Execution entry-point contract.
	diamond: Address,
}

impl Simulator {
	pub fn new(ledger: Arc<dyn Ledger>, oracle: Arc<dyn PriceOracle>, diamond: Address) -> Self {
		Self {
			ledger,
			oracle,
			diamond,
		}
	}

	/// Simulates one snapshot. Never fails as a future; all failure is
	/// captured in the outcome so one candidate cannot affect another.
	pub async fn simulate(&self, snapshot: &RequisitionSnapshot) -> SimulationOutcome {
		let tip_amount = snapshot
			.order()
			.map(|order| order.operator_params.tip_amount)
			.unwrap_or(I256::ZERO);

		let calldata = encode_tractor_call(&snapshot.requisition);

		if let Err(e) = self.ledger.call(self.diamond, calldata.clone()).await {
			return SimulationOutcome::failed(e.to_string(), tip_amount);
		}

		let hash = snapshot.blueprint_hash();

		let gas_estimate = match self.ledger.estimate_gas(self.diamond, calldata).await {
			Ok(gas) => Some(gas),
			Err(e) => {
				warn!(blueprint = %hash, error = %e, "Gas estimate failed");
				None
			}
		};

		let gas_price = match self.ledger.gas_price().await {
			Ok(price) => Some(price),
			Err(e) => {
				warn!(blueprint = %hash, error = %e, "Gas price lookup failed");
				None
			}
		};

		let base_rate = match self.oracle.base_asset_value_rate().await {
			Ok(rate) => Some(rate),
			Err(e) => {
				warn!(blueprint = %hash, error = %e, "Base asset rate lookup failed");
				None
			}
		};

		let order_rate = match self.oracle.order_asset_value_rate().await {
			Ok(rate) => Some(rate),
			Err(e) => {
				warn!(blueprint = %hash, error = %e, "Order asset rate lookup failed");
				None
			}
		};

		let cost_value = cost_value(gas_estimate, gas_price, base_rate);
		let tip_value = tip_value(tip_amount, order_rate);
		let profit = match (tip_value, cost_value) {
			(Some(tip), Some(cost)) => tip.checked_sub(cost),
			_ => None,
		};

		SimulationOutcome {
			success: true,
			failure_reason: None,
			gas_estimate,
			cost_value,
			tip_amount,
			tip_value,
			profit,
		}
	}
}

/// Gas cost converted to the shared value unit, when every input is known.
fn cost_value(gas: Option<u64>, gas_price: Option<u128>, rate: Option<Decimal>) -> Option<Decimal> {
	let wei = (gas? as u128).checked_mul(gas_price?)?;
	let base_amount = Decimal::from_i128_with_scale(i128::try_from(wei).ok()?, BASE_ASSET_DECIMALS);
	base_amount.checked_mul(rate?)
}

/// Tip converted to the shared value unit.
fn tip_value(tip: I256, rate: Option<Decimal>) -> Option<Decimal> {
	let tip = i128::try_from(tip).ok()?;
	let tip_amount = Decimal::from_i128_with_scale(tip, AMOUNT_DECIMALS as u32);
	tip_amount.checked_mul(rate?)
}
