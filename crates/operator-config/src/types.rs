//! Configuration types for the operator.

use alloy::primitives::Address;
use operator_types::ExecutionMode;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::serde_helpers::{deserialize_address, deserialize_opt_address};

/// Complete operator configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OperatorConfig {
	/// Identity, endpoint and scheduling settings.
	pub operator: OperatorSettings,
	/// On-chain contract addresses.
	pub contracts: ContractsConfig,
	/// Value-unit exchange rates consumed by the simulator.
	pub pricing: PricingConfig,
	/// Optional requisition filters.
	#[serde(default)]
	pub filters: FilterConfig,
}

/// Identity and scheduling settings.
#[derive(Debug, Clone, Deserialize)]
pub struct OperatorSettings {
	/// Ledger RPC endpoint URL.
	pub rpc_url: String,
	/// Hex-encoded operator private credential.
	pub private_key: String,
	/// Delay between cycle completions in milliseconds.
	#[serde(default = "default_poll_interval_ms")]
	pub poll_interval_ms: u64,
	/// Preview (default) or execute.
	#[serde(default)]
	pub mode: ExecutionMode,
	/// Confirmations awaited after a submission.
	#[serde(default = "default_confirmations")]
	pub confirmations: u64,
}

/// Contract addresses the operator interacts with.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractsConfig {
	/// Diamond contract carrying the publish/cancel events and the
	/// execution entry point.
	#[serde(deserialize_with = "deserialize_address")]
	pub diamond: Address,
	/// The order-type contract payloads must target to decode.
	#[serde(deserialize_with = "deserialize_address")]
	pub sow_blueprint: Address,
}

/// Exchange rates against the shared value unit.
///
/// Both rates must be quoted against the same reference unit; profit
/// comparison across candidates is meaningless otherwise.
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
	/// Base asset (gas currency) to value unit.
	pub base_asset_rate: Decimal,
	/// Order asset (tip currency) to value unit.
	pub order_asset_rate: Decimal,
}

/// Optional requisition filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterConfig {
	/// Only consider requisitions from this publisher.
	#[serde(default, deserialize_with = "deserialize_opt_address")]
	pub publisher: Option<Address>,
}

fn default_poll_interval_ms() -> u64 {
	10_000
}

fn default_confirmations() -> u64 {
	1
}
