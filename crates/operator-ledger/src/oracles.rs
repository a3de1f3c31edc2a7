//! Price oracle capability.
//!
//! The simulator consumes two exchange rates and nets tip against cost in
//! one shared value unit. Both rates MUST be quoted against that same
//! reference unit; that guarantee is part of this trait's contract, not
//! something the simulator can check.

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OracleError {
	#[error("Price lookup failed: {0}")]
	LookupFailed(String),
}

/// External price-lookup capability.
#[async_trait]
pub trait PriceOracle: Send + Sync {
	/// Base asset (gas currency) to value unit.
	async fn base_asset_value_rate(&self) -> Result<Decimal, OracleError>;

	/// Order asset (tip currency) to value unit.
	async fn order_asset_value_rate(&self) -> Result<Decimal, OracleError>;
}

/// Oracle backed by deployment-supplied rates.
///
/// Both rates come from the same configuration section, which is what keeps
/// them quoted against one reference unit.
pub struct ConfiguredPriceOracle {
	base_asset_rate: Decimal,
	order_asset_rate: Decimal,
}

impl ConfiguredPriceOracle {
	pub fn new(base_asset_rate: Decimal, order_asset_rate: Decimal) -> Self {
		Self {
			base_asset_rate,
			order_asset_rate,
		}
	}
}

#[async_trait]
impl PriceOracle for ConfiguredPriceOracle {
	async fn base_asset_value_rate(&self) -> Result<Decimal, OracleError> {
		Ok(self.base_asset_rate)
	}

	async fn order_asset_value_rate(&self) -> Result<Decimal, OracleError> {
		Ok(self.order_asset_rate)
	}
}
