//! Ledger access for the operator.
//!
//! The [`Ledger`] trait is the one seam between the pipeline and the remote
//! chain: event queries, read-only calls, cost estimation and transaction
//! submission all go through it. The alloy-backed implementation lives in
//! [`implementations`]; tests substitute their own.

use alloy::primitives::{Address, Bytes};
use alloy::rpc::types::{Filter, Log};
use async_trait::async_trait;
use thiserror::Error;

use operator_types::{BlockInfo, TransactionHash, TransactionReceipt};

pub mod implementations;
pub mod oracles;

pub use implementations::alloy_ledger::AlloyLedger;
pub use oracles::{ConfiguredPriceOracle, OracleError, PriceOracle};

#[derive(Debug, Error)]
pub enum LedgerError {
	/// Transport or RPC failure.
	#[error("Network error: {0}")]
	Network(String),
	/// The call itself failed (revert or out-of-gas in a dry-run).
	#[error("Execution error: {0}")]
	Execution(String),
}

/// Remote ledger client used by discovery, simulation and execution.
#[async_trait]
pub trait Ledger: Send + Sync {
	/// Number and timestamp of the latest block.
	async fn latest_block(&self) -> Result<BlockInfo, LedgerError>;

	/// Event logs matching a filter.
	async fn get_logs(&self, filter: &Filter) -> Result<Vec<Log>, LedgerError>;

	/// Read-only call; a revert surfaces as [`LedgerError::Execution`].
	async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, LedgerError>;

	/// Estimated gas for the given call.
	async fn estimate_gas(&self, to: Address, data: Bytes) -> Result<u64, LedgerError>;

	/// Current gas price in wei.
	async fn gas_price(&self) -> Result<u128, LedgerError>;

	/// Signs and submits a transaction, returning its hash.
	async fn submit(&self, to: Address, data: Bytes) -> Result<TransactionHash, LedgerError>;

	/// Blocks until the transaction has the requested confirmations.
	async fn wait_for_confirmation(
		&self,
		hash: &TransactionHash,
		confirmations: u64,
	) -> Result<TransactionReceipt, LedgerError>;
}
