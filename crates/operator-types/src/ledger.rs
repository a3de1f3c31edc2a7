//! Ledger-facing types shared across the operator crates.

use alloy::primitives::B256;
use serde::{Deserialize, Serialize};

/// Hash of a submitted transaction.
pub type TransactionHash = B256;

/// Latest-block metadata used as the reference point of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockInfo {
	pub number: u64,
	/// Block timestamp in Unix seconds.
	pub timestamp: u64,
}

/// Receipt of a confirmed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
	pub hash: TransactionHash,
	/// Block the transaction was included in.
	pub block_number: u64,
	/// Whether execution succeeded.
	pub success: bool,
}
