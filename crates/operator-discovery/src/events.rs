//! Event source for the publish and cancel streams.
//!
//! Raw logs are normalized into [`PublishedRequisition`] right here; the
//! shape ambiguity of transport-level events does not leak past this
//! boundary. One malformed event is dropped with a warning and never
//! aborts the batch.

use std::collections::HashSet;
use std::sync::Arc;

use alloy::primitives::{Address, B256};
use alloy::rpc::types::{Filter, Log};
use alloy::sol_types::SolEvent;
use tracing::warn;

use operator_codec::abi::{self, CancelBlueprint, PublishRequisition};
use operator_ledger::Ledger;
use operator_types::{BlockInfo, DecodeOutcome, PublishedRequisition};

use crate::DiscoveryError;

pub struct RequisitionEventSource {
	ledger: Arc<dyn Ledger>,
	/// Contract emitting both event streams.
	diamond: Address,
}

impl RequisitionEventSource {
	pub fn new(ledger: Arc<dyn Ledger>, diamond: Address) -> Self {
		Self { ledger, diamond }
	}

	/// Reference block for the current cycle.
	pub async fn latest_block(&self) -> Result<BlockInfo, DiscoveryError> {
		Ok(self.ledger.latest_block().await?)
	}

	/// All publish events over blocks [0, `to_block`].
	pub async fn fetch_publishes(
		&self,
		to_block: u64,
	) -> Result<Vec<PublishedRequisition>, DiscoveryError> {
		let filter = Filter::new()
			.address(self.diamond)
			.event_signature(PublishRequisition::SIGNATURE_HASH)
			.from_block(0u64)
			.to_block(to_block);

		let logs = self.ledger.get_logs(&filter).await?;

		let mut published = Vec::with_capacity(logs.len());
		for log in &logs {
			match normalize_publish_log(log) {
				DecodeOutcome::Decoded(requisition) => published.push(requisition),
				DecodeOutcome::Malformed(reason) => {
					warn!(%reason, "Dropping malformed publish event");
				}
				DecodeOutcome::NotApplicable => {}
			}
		}

		Ok(published)
	}

	/// Hashes of all cancelled blueprints over blocks [0, `to_block`].
	///
	/// Reduced to a set for O(1) membership checks; rebuilt from the full
	/// append-only history, so cancellation is monotonic across cycles.
	pub async fn fetch_cancelled_hashes(
		&self,
		to_block: u64,
	) -> Result<HashSet<B256>, DiscoveryError> {
		let filter = Filter::new()
			.address(self.diamond)
			.event_signature(CancelBlueprint::SIGNATURE_HASH)
			.from_block(0u64)
			.to_block(to_block);

		let logs = self.ledger.get_logs(&filter).await?;

		let mut cancelled = HashSet::with_capacity(logs.len());
		for log in &logs {
			match CancelBlueprint::decode_log_data(log.data()) {
				Ok(event) => {
					cancelled.insert(event.blueprintHash);
				}
				Err(e) => {
					warn!(reason = %e, "Dropping malformed cancel event");
				}
			}
		}

		Ok(cancelled)
	}
}

/// The single normalization path from a raw log to a requisition.
fn normalize_publish_log(log: &Log) -> DecodeOutcome<PublishedRequisition> {
	let event = match PublishRequisition::decode_log_data(log.data()) {
		Ok(event) => event,
		Err(e) => return DecodeOutcome::Malformed(format!("undecodable publish event: {}", e)),
	};

	let requisition = match abi::requisition_from_abi(event.requisition) {
		Ok(requisition) => requisition,
		Err(reason) => return DecodeOutcome::Malformed(reason),
	};

	let block_number = match log.block_number {
		Some(number) => number,
		None => return DecodeOutcome::Malformed("publish event missing block number".to_string()),
	};

	DecodeOutcome::Decoded(PublishedRequisition {
		requisition,
		block_number,
		block_timestamp: log.block_timestamp,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy::primitives::{Bytes, LogData, U256};
	use operator_types::{Blueprint, Requisition};

	fn sample_requisition() -> Requisition {
		Requisition {
			blueprint: Blueprint {
				publisher: Address::from([0x11; 20]),
				data: Bytes::from(vec![1, 2, 3]),
				operator_paste_instrs: vec![],
				max_nonce: U256::from(1),
				start_time: 100,
				end_time: 200,
			},
			blueprint_hash: B256::from([0x77; 32]),
			signature: Bytes::from(vec![5; 65]),
		}
	}

	fn publish_log(requisition: &Requisition) -> Log {
		let event = PublishRequisition {
			requisition: abi::requisition_to_abi(requisition),
		};
		Log {
			inner: alloy::primitives::Log {
				address: Address::from([0xdd; 20]),
				data: event.encode_log_data(),
			},
			block_number: Some(42),
			block_timestamp: Some(1_700_000_000),
			..Default::default()
		}
	}

	#[test]
	fn test_normalize_publish_log_round_trip() {
		let requisition = sample_requisition();
		let log = publish_log(&requisition);

		let normalized = normalize_publish_log(&log);
		let published = match normalized {
			DecodeOutcome::Decoded(published) => published,
			other => panic!("expected decoded event, got {:?}", other),
		};
		assert_eq!(published.requisition, requisition);
		assert_eq!(published.block_number, 42);
		assert_eq!(published.block_timestamp, Some(1_700_000_000));
	}

	#[test]
	fn test_normalize_rejects_truncated_event() {
		let log = Log {
			inner: alloy::primitives::Log {
				address: Address::from([0xdd; 20]),
				data: LogData::new_unchecked(
					vec![PublishRequisition::SIGNATURE_HASH],
					Bytes::from(vec![0u8; 10]),
				),
			},
			block_number: Some(42),
			..Default::default()
		};

		assert!(matches!(
			normalize_publish_log(&log),
			DecodeOutcome::Malformed(_)
		));
	}

	#[test]
	fn test_normalize_requires_block_number() {
		let mut log = publish_log(&sample_requisition());
		log.block_number = None;

		assert!(matches!(
			normalize_publish_log(&log),
			DecodeOutcome::Malformed(_)
		));
	}
}
