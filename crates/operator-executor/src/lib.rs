//! Order executor.
//!
//! Runs one state machine per chosen order, terminal on the first failure
//! or on confirmation:
//!
//! ```text
//! Pending -> Simulating -> (SimulationFailed | SimulationOk)
//!         -> (PreviewStopped | Submitting) -> Submitted
//!         -> (Confirmed | SubmitFailed)
//! ```
//!
//! Every order is re-simulated immediately before submission; evaluation
//! and execution happen in the same cycle but ledger state can drift in
//! between. A failed submission is never retried within the cycle.

use std::sync::Arc;

use alloy::primitives::{Address, B256};
use tracing::{error, info, warn};

use operator_codec::encode_tractor_call;
use operator_ledger::Ledger;
use operator_types::{ExecutionMode, RequisitionSnapshot, TransactionHash};

/// State of one order's execution attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStatus {
	Pending,
	Simulating,
	SimulationFailed,
	SimulationOk,
	/// Preview mode stopped after a successful re-simulation. A normal
	/// terminal state, not an error.
	PreviewStopped,
	Submitting,
	Submitted,
	Confirmed,
	SubmitFailed,
}

impl ExecutionStatus {
	pub fn is_terminal(&self) -> bool {
		matches!(
			self,
			ExecutionStatus::SimulationFailed
				| ExecutionStatus::PreviewStopped
				| ExecutionStatus::Confirmed
				| ExecutionStatus::SubmitFailed
		)
	}
}

/// Outcome of one order's execution attempt.
#[derive(Debug, Clone)]
pub struct ExecutionRecord {
	pub blueprint_hash: B256,
	pub status: ExecutionStatus,
	pub tx_hash: Option<TransactionHash>,
	/// Confirming block, when execution reached on-chain inclusion.
	pub block_number: Option<u64>,
	pub failure: Option<String>,
}

impl ExecutionRecord {
	fn new(blueprint_hash: B256) -> Self {
		Self {
			blueprint_hash,
			status: ExecutionStatus::Pending,
			tx_hash: None,
			block_number: None,
			failure: None,
		}
	}
}

pub struct Executor {
	ledger: Arc<dyn Ledger>,
	/// Execution entry-point contract.
	diamond: Address,
	mode: ExecutionMode,
	confirmations: u64,
}

impl Executor {
	pub fn new(
		ledger: Arc<dyn Ledger>,
		diamond: Address,
		mode: ExecutionMode,
		confirmations: u64,
	) -> Self {
		Self {
			ledger,
			diamond,
			mode,
			confirmations,
		}
	}

	/// Runs the state machine for one order.
	pub async fn execute(&self, snapshot: &RequisitionSnapshot) -> ExecutionRecord {
		let hash = snapshot.blueprint_hash();
		let calldata = encode_tractor_call(&snapshot.requisition);
		let mut record = ExecutionRecord::new(hash);

		record.status = ExecutionStatus::Simulating;
		if let Err(e) = self.ledger.call(self.diamond, calldata.clone()).await {
			warn!(blueprint = %hash, reason = %e, "Re-simulation failed");
			record.status = ExecutionStatus::SimulationFailed;
			record.failure = Some(e.to_string());
			return record;
		}
		record.status = ExecutionStatus::SimulationOk;

		if self.mode == ExecutionMode::Preview {
			info!(blueprint = %hash, "Preview mode, stopping before submission");
			record.status = ExecutionStatus::PreviewStopped;
			return record;
		}

		record.status = ExecutionStatus::Submitting;
		let tx_hash = match self.ledger.submit(self.diamond, calldata).await {
			Ok(tx_hash) => tx_hash,
			Err(e) => {
				error!(blueprint = %hash, reason = %e, "Submission failed");
				record.status = ExecutionStatus::SubmitFailed;
				record.failure = Some(e.to_string());
				return record;
			}
		};
		record.status = ExecutionStatus::Submitted;
		record.tx_hash = Some(tx_hash);

		match self
			.ledger
			.wait_for_confirmation(&tx_hash, self.confirmations)
			.await
		{
			Ok(receipt) if receipt.success => {
				info!(
					blueprint = %hash,
					block = receipt.block_number,
					"Execution confirmed"
				);
				record.status = ExecutionStatus::Confirmed;
				record.block_number = Some(receipt.block_number);
			}
			Ok(receipt) => {
				error!(blueprint = %hash, block = receipt.block_number, "Execution reverted");
				record.status = ExecutionStatus::SubmitFailed;
				record.block_number = Some(receipt.block_number);
				record.failure = Some("transaction reverted".to_string());
			}
			Err(e) => {
				error!(blueprint = %hash, reason = %e, "Confirmation failed");
				record.status = ExecutionStatus::SubmitFailed;
				record.failure = Some(e.to_string());
			}
		}

		record
	}

	/// Executes orders strictly sequentially, best first.
	///
	/// Submissions share one account's nonce, so each order's confirmation
	/// is awaited before the next submission. A failure is terminal for
	/// that order only; the rest of the list still runs.
	pub async fn execute_all(&self, snapshots: &[&RequisitionSnapshot]) -> Vec<ExecutionRecord> {
		let mut records = Vec::with_capacity(snapshots.len());
		for snapshot in snapshots {
			records.push(self.execute(snapshot).await);
		}
		records
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy::primitives::{Bytes, U256};
	use alloy::rpc::types::{Filter, Log};
	use async_trait::async_trait;
	use operator_ledger::LedgerError;
	use operator_types::{
		BlockInfo, Blueprint, DecodeOutcome, Requisition, TransactionReceipt,
	};
	use std::sync::atomic::{AtomicUsize, Ordering};

	struct StubLedger {
		simulation_fails: bool,
		submit_fails: bool,
		receipt_success: bool,
		submissions: AtomicUsize,
	}

	impl StubLedger {
		fn new(simulation_fails: bool, submit_fails: bool, receipt_success: bool) -> Self {
			Self {
				simulation_fails,
				submit_fails,
				receipt_success,
				submissions: AtomicUsize::new(0),
			}
		}
	}

	#[async_trait]
	impl Ledger for StubLedger {
		async fn latest_block(&self) -> Result<BlockInfo, LedgerError> {
			Ok(BlockInfo {
				number: 10,
				timestamp: 0,
			})
		}

		async fn get_logs(&self, _filter: &Filter) -> Result<Vec<Log>, LedgerError> {
			Ok(vec![])
		}

		async fn call(&self, _to: Address, _data: Bytes) -> Result<Bytes, LedgerError> {
			if self.simulation_fails {
				Err(LedgerError::Execution("execution reverted".to_string()))
			} else {
				Ok(Bytes::new())
			}
		}

		async fn estimate_gas(&self, _to: Address, _data: Bytes) -> Result<u64, LedgerError> {
			Ok(100_000)
		}

		async fn gas_price(&self) -> Result<u128, LedgerError> {
			Ok(1_000_000_000)
		}

		async fn submit(&self, _to: Address, _data: Bytes) -> Result<TransactionHash, LedgerError> {
			self.submissions.fetch_add(1, Ordering::SeqCst);
			if self.submit_fails {
				Err(LedgerError::Network("nonce too low".to_string()))
			} else {
				Ok(TransactionHash::from([0xaa; 32]))
			}
		}

		async fn wait_for_confirmation(
			&self,
			hash: &TransactionHash,
			_confirmations: u64,
		) -> Result<TransactionReceipt, LedgerError> {
			Ok(TransactionReceipt {
				hash: *hash,
				block_number: 1234,
				success: self.receipt_success,
			})
		}
	}

	fn snapshot() -> RequisitionSnapshot {
		RequisitionSnapshot {
			requisition: Requisition {
				blueprint: Blueprint {
					publisher: Address::from([0x11; 20]),
					data: Bytes::new(),
					operator_paste_instrs: vec![],
					max_nonce: U256::from(1),
					start_time: 100,
					end_time: 200,
				},
				blueprint_hash: B256::from([0x42; 32]),
				signature: Bytes::new(),
			},
			order: DecodeOutcome::NotApplicable,
			cancelled: false,
			block_number: 1,
			block_timestamp: None,
		}
	}

	fn executor(ledger: Arc<StubLedger>, mode: ExecutionMode) -> Executor {
		Executor::new(ledger, Address::from([0xdd; 20]), mode, 1)
	}

	#[tokio::test]
	async fn test_preview_mode_stops_before_submission() {
		let ledger = Arc::new(StubLedger::new(false, false, true));
		let exec = executor(ledger.clone(), ExecutionMode::Preview);

		let record = exec.execute(&snapshot()).await;

		assert_eq!(record.status, ExecutionStatus::PreviewStopped);
		assert!(record.status.is_terminal());
		assert_eq!(ledger.submissions.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn test_execute_mode_confirms_and_reports_block() {
		let ledger = Arc::new(StubLedger::new(false, false, true));
		let exec = executor(ledger.clone(), ExecutionMode::Execute);

		let record = exec.execute(&snapshot()).await;

		assert_eq!(record.status, ExecutionStatus::Confirmed);
		assert_eq!(record.block_number, Some(1234));
		assert_eq!(record.tx_hash, Some(TransactionHash::from([0xaa; 32])));
		assert_eq!(ledger.submissions.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn test_failed_resimulation_is_terminal() {
		let ledger = Arc::new(StubLedger::new(true, false, true));
		let exec = executor(ledger.clone(), ExecutionMode::Execute);

		let record = exec.execute(&snapshot()).await;

		assert_eq!(record.status, ExecutionStatus::SimulationFailed);
		assert!(record.failure.is_some());
		assert_eq!(ledger.submissions.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn test_failed_submission_is_terminal_without_retry() {
		let ledger = Arc::new(StubLedger::new(false, true, true));
		let exec = executor(ledger.clone(), ExecutionMode::Execute);

		let record = exec.execute(&snapshot()).await;

		assert_eq!(record.status, ExecutionStatus::SubmitFailed);
		// Exactly one attempt; never retried within the cycle.
		assert_eq!(ledger.submissions.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn test_reverted_receipt_is_a_submit_failure() {
		let ledger = Arc::new(StubLedger::new(false, false, false));
		let exec = executor(ledger.clone(), ExecutionMode::Execute);

		let record = exec.execute(&snapshot()).await;

		assert_eq!(record.status, ExecutionStatus::SubmitFailed);
		assert_eq!(record.block_number, Some(1234));
	}

	#[tokio::test]
	async fn test_execute_all_continues_past_failures() {
		let ledger = Arc::new(StubLedger::new(false, true, true));
		let exec = executor(ledger.clone(), ExecutionMode::Execute);

		let first = snapshot();
		let second = snapshot();
		let records = exec.execute_all(&[&first, &second]).await;

		assert_eq!(records.len(), 2);
		assert!(records
			.iter()
			.all(|record| record.status == ExecutionStatus::SubmitFailed));
		assert_eq!(ledger.submissions.load(Ordering::SeqCst), 2);
	}
}
