//! Requisition loader.
//!
//! Joins the publish stream with the cancel set into snapshots: decodes
//! each payload, tags cancellation, and applies the optional publisher and
//! order-type filters. A requisition whose payload is not the supported
//! order type stays in the output (for monitoring) unless the caller asked
//! for supported orders only.

use std::collections::HashSet;

use alloy::primitives::{Address, B256};

use operator_codec::decode_sow_blueprint;
use operator_types::{PublishedRequisition, RequisitionSnapshot};

pub struct RequisitionLoader {
	/// Order-type contract payloads must target to decode.
	sow_blueprint: Address,
}

impl RequisitionLoader {
	pub fn new(sow_blueprint: Address) -> Self {
		Self { sow_blueprint }
	}

	pub fn load(
		&self,
		publishes: Vec<PublishedRequisition>,
		cancelled: &HashSet<B256>,
		publisher: Option<Address>,
		only_supported: bool,
	) -> Vec<RequisitionSnapshot> {
		publishes
			.into_iter()
			.filter_map(|published| {
				let requisition = published.requisition;

				if let Some(publisher) = publisher {
					if requisition.blueprint.publisher != publisher {
						return None;
					}
				}

				let order = decode_sow_blueprint(&requisition.blueprint.data, self.sow_blueprint);
				if only_supported && !order.is_decoded() {
					return None;
				}

				let is_cancelled = cancelled.contains(&requisition.blueprint_hash);

				Some(RequisitionSnapshot {
					requisition,
					order,
					cancelled: is_cancelled,
					block_number: published.block_number,
					block_timestamp: published.block_timestamp,
				})
			})
			.collect()
	}
}
