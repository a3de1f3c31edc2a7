//! Eligibility filtering.

use alloy::primitives::Address;

use operator_types::RequisitionSnapshot;

/// Whether this operator may execute the snapshot right now.
///
/// Requires an active time window, no cancellation, a decoded order, and
/// whitelist membership (an empty whitelist permits every operator).
/// Snapshots without decoded parameters have no defined eligibility and are
/// excluded here even though they stay visible in monitoring output.
pub fn is_executable(snapshot: &RequisitionSnapshot, operator: Address, now_ms: u64) -> bool {
	if !snapshot.is_active(now_ms) {
		return false;
	}
	match snapshot.order() {
		Some(order) => order.operator_params.permits(operator),
		None => false,
	}
}

/// The executable subset of a cycle's snapshots, input order preserved.
pub fn executable<'a>(
	snapshots: &'a [RequisitionSnapshot],
	operator: Address,
	now_ms: u64,
) -> Vec<&'a RequisitionSnapshot> {
	snapshots
		.iter()
		.filter(|snapshot| is_executable(snapshot, operator, now_ms))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy::primitives::{Bytes, B256, I256, U256};
	use operator_types::{Blueprint, DecodeOutcome, OperatorParams, Requisition, SowOrder};

	fn order_with_whitelist(whitelist: Vec<Address>) -> SowOrder {
		let amount = U256::from(1_000_000u64);
		SowOrder {
			source_token_indices: vec![0],
			total_amount: amount,
			total_amount_display: "1".to_string(),
			min_amount_per_season: amount,
			min_amount_per_season_display: "1".to_string(),
			max_amount_per_season: amount,
			max_amount_per_season_display: "1".to_string(),
			min_temperature: amount,
			min_temperature_display: "1".to_string(),
			max_podline_length: amount,
			max_podline_length_display: "1".to_string(),
			max_grown_stalk_per_bdv: amount,
			max_grown_stalk_per_bdv_display: "1".to_string(),
			run_blocks_after_sunrise: U256::from(300u64),
			slippage_ratio: amount,
			slippage_ratio_display: "0.000000000001".to_string(),
			operator_params: OperatorParams {
				whitelist,
				tip_address: Address::from([0x22; 20]),
				tip_amount: I256::try_from(1_000_000i64).unwrap(),
				tip_amount_display: "1".to_string(),
			},
		}
	}

	fn snapshot(
		order: DecodeOutcome<SowOrder>,
		cancelled: bool,
		start_time: u64,
		end_time: u64,
	) -> RequisitionSnapshot {
		RequisitionSnapshot {
			requisition: Requisition {
				blueprint: Blueprint {
					publisher: Address::from([0x11; 20]),
					data: Bytes::new(),
					operator_paste_instrs: vec![],
					max_nonce: U256::from(1),
					start_time,
					end_time,
				},
				blueprint_hash: B256::from([0x42; 32]),
				signature: Bytes::new(),
			},
			order,
			cancelled,
			block_number: 1,
			block_timestamp: None,
		}
	}

	#[test]
	fn test_active_window_with_empty_whitelist() {
		let operator = Address::from([0xaa; 20]);
		let snap = snapshot(
			DecodeOutcome::Decoded(order_with_whitelist(vec![])),
			false,
			100,
			200,
		);

		assert!(is_executable(&snap, operator, 150_000));
		// Start boundary inclusive, end boundary exclusive.
		assert!(is_executable(&snap, operator, 100_000));
		assert!(!is_executable(&snap, operator, 200_000));
		assert!(!is_executable(&snap, operator, 99_999));
	}

	#[test]
	fn test_cancelled_is_never_executable() {
		let operator = Address::from([0xaa; 20]);
		let snap = snapshot(
			DecodeOutcome::Decoded(order_with_whitelist(vec![])),
			true,
			100,
			200,
		);
		assert!(!is_executable(&snap, operator, 150_000));
	}

	#[test]
	fn test_whitelist_membership() {
		let operator = Address::from([0xaa; 20]);
		let other = Address::from([0xab; 20]);

		let listed = snapshot(
			DecodeOutcome::Decoded(order_with_whitelist(vec![operator])),
			false,
			100,
			200,
		);
		assert!(is_executable(&listed, operator, 150_000));
		assert!(!is_executable(&listed, other, 150_000));
	}

	#[test]
	fn test_undecoded_order_is_excluded() {
		let operator = Address::from([0xaa; 20]);
		let snap = snapshot(DecodeOutcome::NotApplicable, false, 100, 200);
		assert!(!is_executable(&snap, operator, 150_000));
	}

	#[test]
	fn test_executable_preserves_input_order() {
		let operator = Address::from([0xaa; 20]);
		let a = snapshot(
			DecodeOutcome::Decoded(order_with_whitelist(vec![])),
			false,
			100,
			200,
		);
		let b = snapshot(DecodeOutcome::NotApplicable, false, 100, 200);
		let c = snapshot(
			DecodeOutcome::Decoded(order_with_whitelist(vec![])),
			false,
			100,
			200,
		);
		let snapshots = vec![a, b, c];

		let executable = executable(&snapshots, operator, 150_000);
		assert_eq!(executable.len(), 2);
	}
}
