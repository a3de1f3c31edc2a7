//! Requisition types for the operator.
//!
//! This module defines the published order shapes the operator works with:
//! the on-chain blueprint, the signed requisition wrapping it, and the
//! read-time snapshot that joins a requisition with its cancellation status
//! and decoded payload.

use alloy::primitives::{Address, Bytes, B256, I256, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decode::DecodeOutcome;

/// Fixed-point precision for asset amounts, temperatures and per-BDV rates.
pub const AMOUNT_DECIMALS: u8 = 6;

/// Fixed-point precision for the slippage ratio.
pub const RATIO_DECIMALS: u8 = 18;

/// An immutable order description published by a publisher.
///
/// A blueprint is never mutated after publication; its lifecycle state
/// (pending, active, expired, cancelled) is derived from the current time
/// and the cancellation event set, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blueprint {
	/// Account that published and signed the blueprint.
	pub publisher: Address,
	/// Opaque call payload; decoded separately into order parameters.
	pub data: Bytes,
	/// Operator-paste instruction markers (empty in the current schema).
	pub operator_paste_instrs: Vec<B256>,
	/// Maximum number of times the blueprint may be used.
	pub max_nonce: U256,
	/// Activation start time (Unix seconds, inclusive).
	pub start_time: u64,
	/// Expiration end time (Unix seconds, exclusive).
	pub end_time: u64,
}

/// A blueprint plus its hash and the publisher's authorization signature.
///
/// The blueprint hash is the order's identity; all subsequent events
/// reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requisition {
	pub blueprint: Blueprint,
	pub blueprint_hash: B256,
	pub signature: Bytes,
}

/// A requisition as it appeared in a publish event, with block metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedRequisition {
	pub requisition: Requisition,
	/// Block the publish event originated from.
	pub block_number: u64,
	/// Timestamp of that block, when the transport provided it.
	pub block_timestamp: Option<u64>,
}

/// Decoded parameters of the one supported order type.
///
/// Every fixed-point field carries a human-decimal display string next to
/// the integer it was decoded from. The integers are the arithmetic
/// representation; the strings exist for display and reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SowOrder {
	/// Whitelist indices of the source assets the order may draw from.
	pub source_token_indices: Vec<u8>,
	pub total_amount: U256,
	pub total_amount_display: String,
	pub min_amount_per_season: U256,
	pub min_amount_per_season_display: String,
	pub max_amount_per_season: U256,
	pub max_amount_per_season_display: String,
	pub min_temperature: U256,
	pub min_temperature_display: String,
	pub max_podline_length: U256,
	pub max_podline_length_display: String,
	pub max_grown_stalk_per_bdv: U256,
	pub max_grown_stalk_per_bdv_display: String,
	/// Opaque configured block-delay value; carried through unchanged.
	pub run_blocks_after_sunrise: U256,
	pub slippage_ratio: U256,
	pub slippage_ratio_display: String,
	pub operator_params: OperatorParams,
}

/// Operator-facing constraints and compensation attached to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorParams {
	/// Operators permitted to execute the order. Empty means unrestricted.
	pub whitelist: Vec<Address>,
	/// Recipient of the tip.
	pub tip_address: Address,
	/// Signed tip amount in the order asset, at [`AMOUNT_DECIMALS`].
	pub tip_amount: I256,
	pub tip_amount_display: String,
}

impl OperatorParams {
	/// An operator is permitted iff the whitelist is empty or contains it.
	pub fn permits(&self, operator: Address) -> bool {
		self.whitelist.is_empty() || self.whitelist.contains(&operator)
	}
}

/// Derived lifecycle state of a requisition at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlueprintStatus {
	/// Activation window has not opened yet.
	Pending,
	Active,
	Expired,
	Cancelled,
}

impl fmt::Display for BlueprintStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			BlueprintStatus::Pending => write!(f, "pending"),
			BlueprintStatus::Active => write!(f, "active"),
			BlueprintStatus::Expired => write!(f, "expired"),
			BlueprintStatus::Cancelled => write!(f, "cancelled"),
		}
	}
}

/// Point-in-time view of a requisition, rebuilt fresh every cycle.
///
/// Cancellation is monotonic: the cancel set is reconstructed from the full
/// append-only event history, so a hash observed cancelled stays cancelled
/// for every later query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequisitionSnapshot {
	pub requisition: Requisition,
	/// Decoded order parameters, or why there are none.
	pub order: DecodeOutcome<SowOrder>,
	pub cancelled: bool,
	pub block_number: u64,
	pub block_timestamp: Option<u64>,
}

impl RequisitionSnapshot {
	pub fn blueprint_hash(&self) -> B256 {
		self.requisition.blueprint_hash
	}

	/// Decoded parameters, if the payload was the supported order type.
	pub fn order(&self) -> Option<&SowOrder> {
		self.order.decoded()
	}

	/// Lifecycle state at `now_ms` (Unix milliseconds).
	///
	/// Cancellation takes precedence over the time window. The window is
	/// start-inclusive and end-exclusive.
	pub fn status(&self, now_ms: u64) -> BlueprintStatus {
		if self.cancelled {
			return BlueprintStatus::Cancelled;
		}
		let now = now_ms as u128;
		if (self.requisition.blueprint.start_time as u128) * 1000 > now {
			BlueprintStatus::Pending
		} else if (self.requisition.blueprint.end_time as u128) * 1000 <= now {
			BlueprintStatus::Expired
		} else {
			BlueprintStatus::Active
		}
	}

	pub fn is_active(&self, now_ms: u64) -> bool {
		self.status(now_ms) == BlueprintStatus::Active
	}
}
